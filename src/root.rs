//! Pointing a config file at a different data directory.
//!
//! HEMCO and NEXUS configs locate every input through the `ROOT` setting.
//! Rewriting it is a line edit: everything but the value is kept as is.

use crate::dialect::Dialect;
use crate::line::{LineKind, classify};
use log::info;

/// Replace the value of the first `ROOT: ...` setting with `dir`.
///
/// The key column (text before the colon, padding included) and every other
/// line are left untouched. Returns `None` when there is no `ROOT` setting.
pub fn set_root(text: &str, dir: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len() + dir.len());
    let mut replaced = false;

    for (i, line) in text.split_inclusive('\n').enumerate() {
        if !replaced && is_root_line(line) {
            let (column, _) = line.split_once(':')?;
            let body = line.trim_end_matches(['\n', '\r']);
            let ending = &line[body.len()..];

            out.push_str(column);
            out.push_str(": ");
            out.push_str(dir);
            out.push_str(ending);

            info!("line {}: ROOT set to {dir}", i + 1);
            replaced = true;
            continue;
        }
        out.push_str(line);
    }

    replaced.then_some(out)
}

fn is_root_line(line: &str) -> bool {
    matches!(classify(line, Dialect::Config), LineKind::KeyValue { key: "ROOT", .. })
}
