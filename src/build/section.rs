use crate::build::Warning;
use crate::dialect::{Decoded, Dialect, RowDecoder};
use crate::error::{ConvertError, Result};
use crate::line::{LineKind, classify};
use crate::model::{ConfigTree, Entry, SectionBody};
use log::{debug, info, trace, warn};
use std::collections::BTreeMap;

/// The section currently being filled.
#[derive(Debug, Clone)]
struct OpenSection {
    name: String,
    /// Line of the `BEGIN` marker.
    line: usize,
    has_values: bool,
    has_rows: bool,
    mixed_reported: bool,
}

/// Parser position between two lines. Lives only for one parse.
#[derive(Debug, Clone, Default)]
struct ParseCursor {
    section: Option<OpenSection>,
    /// Row group that new token rows are appended to (config dialect only).
    subsection: Option<String>,
}

/// Accumulates one file's lines into a tree.
#[derive(Debug)]
pub struct SectionBuilder {
    dialect: Dialect,
    decoder: Option<RowDecoder>,
    tree: ConfigTree,
    cursor: ParseCursor,
    warnings: Vec<Warning>,
}

impl SectionBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            decoder: dialect.decoder(),
            tree: ConfigTree::new(),
            cursor: ParseCursor::default(),
            warnings: Vec::new(),
        }
    }

    /// Classify and apply one line. `lineno` is 1-based and only used for reporting.
    pub fn feed(&mut self, lineno: usize, raw: &str) -> Result<()> {
        let kind = classify(raw, self.dialect);
        trace!("line {lineno}: {kind}");

        match kind {
            LineKind::Comment | LineKind::Blank | LineKind::Skip => {}
            LineKind::SectionBegin(name) => self.begin(name, lineno),
            LineKind::SectionEnd => self.end(lineno),
            LineKind::KeyValue { key, value } => self.key_value(key, value, lineno),
            LineKind::DataRow(tokens) => self.data_row(&tokens, raw, lineno)?,
        }

        Ok(())
    }

    /// Close out the parse. A section still open here is reported, and kept.
    pub fn finish(mut self) -> (ConfigTree, Vec<Warning>) {
        if let Some(open) = self.cursor.section.take() {
            self.report(Warning::UnterminatedSection {
                section: open.name,
                line: open.line,
            });
        }
        (self.tree, self.warnings)
    }

    fn begin(&mut self, name: &str, lineno: usize) {
        if let Some(open) = self.cursor.section.take() {
            self.report(Warning::UnterminatedSection {
                section: open.name,
                line: open.line,
            });
        }

        let body = match self.decoder {
            Some(RowDecoder::Diagnostics) => SectionBody::empty_records(),
            _ => SectionBody::empty_map(),
        };
        if self.tree.open_section(name, body) {
            debug!("line {lineno}: section {name:?} seen again, dropping earlier content");
        }
        info!("Started section: {name}");

        self.cursor = ParseCursor {
            section: Some(OpenSection {
                name: name.to_string(),
                line: lineno,
                has_values: false,
                has_rows: false,
                mixed_reported: false,
            }),
            subsection: None,
        };
    }

    fn end(&mut self, lineno: usize) {
        match self.cursor.section.take() {
            Some(open) => info!("Ended section: {}", open.name),
            None => debug!("line {lineno}: END without an open section"),
        }
        self.cursor.subsection = None;
    }

    fn key_value(&mut self, key: &str, value: &str, lineno: usize) {
        if self.dialect.is_flat() {
            debug!("Parsed key-value pair: {key}: {value}");
            self.tree.set_value(key, value);
            return;
        }

        let Some(open) = self.cursor.section.as_mut() else {
            debug!("line {lineno}: dropping key {key:?} outside any section");
            return;
        };
        let Some(map) = mapped_body(&mut self.tree, &open.name) else {
            return;
        };

        map.insert(key.to_string(), Entry::Value(value.to_string()));
        open.has_values = true;
        debug!("Parsed key-value pair: {key}: {value}");

        self.check_mixed(lineno);
    }

    fn data_row(&mut self, tokens: &[&str], raw: &str, lineno: usize) -> Result<()> {
        let Some(decoder) = self.decoder else {
            debug!("line {lineno}: ignoring non key-value line in {} file", self.dialect);
            return Ok(());
        };
        let Some(open) = self.cursor.section.as_mut() else {
            debug!("line {lineno}: dropping row outside any section");
            return Ok(());
        };

        let decoded = decoder
            .decode(tokens)
            .map_err(|e| ConvertError::SchemaViolation {
                dialect: self.dialect,
                line: lineno,
                expected: e.expected,
                found: e.found,
                content: raw.trim_end().to_string(),
            })?;
        debug!("Parsed row {:?}: {tokens:?}", decoded.key());

        match decoded {
            Decoded::Tokens(row) => {
                let Some(map) = mapped_body(&mut self.tree, &open.name) else {
                    return Ok(());
                };
                match &self.cursor.subsection {
                    Some(sub) => match map.get_mut(sub) {
                        Some(Entry::Rows(rows)) => rows.push(row),
                        // A later `key: value` took the group's name; start it over.
                        _ => {
                            map.insert(sub.clone(), Entry::Rows(vec![row]));
                        }
                    },
                    None => {
                        let sub = row[0].clone();
                        map.insert(sub.clone(), Entry::Rows(vec![row]));
                        self.cursor.subsection = Some(sub);
                    }
                }
                open.has_rows = true;
            }
            Decoded::Diagnostic(record) => {
                if let Some(SectionBody::Records(records)) = self.tree.section_mut(&open.name) {
                    records.push(record);
                }
            }
            Decoded::Species { symbol, record } => {
                if let Some(map) = mapped_body(&mut self.tree, &open.name) {
                    map.insert(symbol, Entry::Species(record));
                }
            }
        }

        self.check_mixed(lineno);
        Ok(())
    }

    fn check_mixed(&mut self, lineno: usize) {
        let Some(open) = self.cursor.section.as_mut() else {
            return;
        };
        if open.has_values && open.has_rows && !open.mixed_reported {
            open.mixed_reported = true;
            let warning = Warning::AmbiguousSectionBody {
                section: open.name.clone(),
                line: lineno,
            };
            self.report(warning);
        }
    }

    fn report(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }
}

fn mapped_body<'t>(
    tree: &'t mut ConfigTree,
    name: &str,
) -> Option<&'t mut BTreeMap<String, Entry>> {
    match tree.section_mut(name)? {
        SectionBody::Map(map) => Some(map),
        SectionBody::Records(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(dialect: Dialect, text: &str) -> (ConfigTree, Vec<Warning>) {
        let mut builder = SectionBuilder::new(dialect);
        for (i, line) in text.lines().enumerate() {
            builder.feed(i + 1, line).unwrap();
        }
        builder.finish()
    }

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn rows_gather_under_the_first_rows_key() {
        let (tree, warnings) = build(
            Dialect::Config,
            "\
BEGIN SECTION BASE EMISSIONS
0 MEGAN_NO $ROOT/a.nc NO 2000/1/1/0 C xy kg/m2/s NO - 1 1
0 MEGAN_CO $ROOT/b.nc CO 2000/1/1/0 C xy kg/m2/s CO - 1 1
END SECTION
",
        );

        let body = tree.section("BASE EMISSIONS").unwrap();
        assert_eq!(body.len(), 1);
        assert_eq!(
            body.get("0").and_then(Entry::as_rows).map(<[_]>::to_vec),
            Some(vec![
                tokens("0 MEGAN_NO $ROOT/a.nc NO 2000/1/1/0 C xy kg/m2/s NO - 1 1"),
                tokens("0 MEGAN_CO $ROOT/b.nc CO 2000/1/1/0 C xy kg/m2/s CO - 1 1"),
            ])
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn subsection_resets_with_each_section() {
        let (tree, _) = build(
            Dialect::Config,
            "\
BEGIN SECTION A
x 1
y 2
END SECTION
BEGIN SECTION B
y 3
END SECTION
",
        );

        assert_eq!(
            tree.section("A").and_then(|b| b.get("x")).and_then(Entry::as_rows).map(<[_]>::len),
            Some(2)
        );
        assert!(tree.section("A").and_then(|b| b.get("y")).is_none());
        assert_eq!(
            tree.section("B").and_then(|b| b.get("y")).and_then(Entry::as_rows).map(<[_]>::len),
            Some(1)
        );
    }

    #[test]
    fn lines_outside_sections_are_dropped() {
        let (tree, warnings) = build(
            Dialect::Config,
            "\
Stray: value
stray row
END SECTION
",
        );

        assert!(tree.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn mixed_body_is_kept_and_reported_once() {
        let (tree, warnings) = build(
            Dialect::Config,
            "\
BEGIN SECTION EXT
Verbose: true
100 Custom : on NO
--> Emission: 1
200 Megan x
300 Other y
END SECTION
",
        );

        // Any line with ':' is a setting, even when it looks like a row.
        let body = tree.section("EXT").unwrap();
        assert_eq!(body.get("100 Custom").and_then(Entry::as_value), Some("on NO"));
        assert_eq!(body.get("--> Emission").and_then(Entry::as_value), Some("1"));
        assert_eq!(
            body.get("200").and_then(Entry::as_rows).map(<[_]>::len),
            Some(2)
        );
        assert_eq!(
            warnings,
            vec![Warning::AmbiguousSectionBody {
                section: "EXT".into(),
                line: 5,
            }]
        );
    }

    #[test]
    fn setting_that_shadows_a_group_restarts_it() {
        let (tree, _) = build(
            Dialect::Config,
            "\
BEGIN SECTION S
g 1
g: overwritten
g 2
END SECTION
",
        );

        assert_eq!(
            tree.section("S").and_then(|b| b.get("g")),
            Some(&Entry::Rows(vec![tokens("g 2")]))
        );
    }

    #[test]
    fn unterminated_sections_are_kept_and_reported() {
        let (tree, warnings) = build(
            Dialect::Config,
            "\
BEGIN SECTION First
a: 1
BEGIN SECTION Second
b: 2
",
        );

        assert_eq!(tree.section("First").and_then(|b| b.get("a")).and_then(Entry::as_value), Some("1"));
        assert_eq!(tree.section("Second").and_then(|b| b.get("b")).and_then(Entry::as_value), Some("2"));
        assert_eq!(
            warnings,
            vec![
                Warning::UnterminatedSection { section: "First".into(), line: 1 },
                Warning::UnterminatedSection { section: "Second".into(), line: 3 },
            ]
        );
    }

    #[test]
    fn diagnostics_rows_keep_file_order() {
        let (tree, _) = build(
            Dialect::Diagnostics,
            "\
BEGIN Diagnostics
EmisNO_Total NO -1 -1 -1 3 kg/m2/s NO emissions
EmisCO_Total CO -1 -1 -1 3 kg/m2/s
END
",
        );

        let names: Vec<&str> = tree
            .section("Diagnostics")
            .unwrap()
            .records()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["EmisNO_Total", "EmisCO_Total"]);
    }

    #[test]
    fn short_row_reports_line_and_content() {
        let mut builder = SectionBuilder::new(Dialect::Diagnostics);
        builder.feed(1, "BEGIN Diagnostics").unwrap();
        let err = builder.feed(2, "EmisNO NO -1\n").unwrap_err();

        match err {
            ConvertError::SchemaViolation {
                dialect,
                line,
                expected,
                found,
                content,
            } => {
                assert_eq!(dialect, Dialect::Diagnostics);
                assert_eq!((line, expected, found), (2, 7, 3));
                assert_eq!(content, "EmisNO NO -1");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn grid_is_flat_and_ignores_rows() {
        let (tree, warnings) = build(
            Dialect::Grid,
            "\
# Grid definition
XMIN: -180.0  # west edge
NX: 360
some free text
",
        );

        assert_eq!(tree.value("XMIN"), Some("-180.0"));
        assert_eq!(tree.value("NX"), Some("360"));
        assert_eq!(tree.len(), 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn indented_comment_characters_are_content() {
        let (tree, _) = build(
            Dialect::Config,
            "\
BEGIN SECTION S
   # foo: bar
  ! x y
END SECTION
",
        );

        let body = tree.section("S").unwrap();
        assert_eq!(body.get("# foo").and_then(Entry::as_value), Some("bar"));
        assert_eq!(
            body.get("!"),
            Some(&Entry::Rows(vec![tokens("! x y")]))
        );
    }

    #[test]
    fn any_end_word_closes_the_section() {
        let (tree, warnings) = build(
            Dialect::Config,
            "\
BEGIN SECTION S
END : x
k: v
END SECTION
",
        );

        // `k: v` arrives after the section closed and is dropped.
        assert_eq!(tree.section("S"), Some(&SectionBody::empty_map()));
        assert!(warnings.is_empty());
    }
}
