use crate::build::{SectionBuilder, Warning};
use crate::dialect::Dialect;
use crate::error::{ConvertError, Result};
use crate::model::ConfigTree;
use log::info;
use std::fs;
use std::path::Path;

/// A completed parse: the tree plus anything tolerated along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub tree: ConfigTree,
    pub warnings: Vec<Warning>,
}

/// Fold a line source through a fresh builder, one line at a time.
pub fn parse_lines<I, S>(lines: I, dialect: Dialect) -> Result<Parsed>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let builder = lines.into_iter().enumerate().try_fold(
        SectionBuilder::new(dialect),
        |mut builder, (i, line)| {
            builder.feed(i + 1, line.as_ref())?;
            Ok::<_, ConvertError>(builder)
        },
    )?;

    let (tree, warnings) = builder.finish();
    Ok(Parsed { tree, warnings })
}

pub fn parse_str(text: &str, dialect: Dialect) -> Result<Parsed> {
    parse_lines(text.lines(), dialect)
}

/// Read and parse one file.
pub fn parse_file(path: impl AsRef<Path>, dialect: Dialect) -> Result<Parsed> {
    let path = path.as_ref();
    info!("Starting to parse {dialect} file: {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| ConvertError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = parse_str(&text, dialect)?;

    info!(
        "Finished parsing file: {} ({} entries, {} warnings)",
        path.display(),
        parsed.tree.len(),
        parsed.warnings.len()
    );
    Ok(parsed)
}
