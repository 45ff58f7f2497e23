use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

/// One HEMCO_Diagn.rc row.
///
/// Expected columns (whitespace-separated):
/// Name  Spec  ExtNr  Cat  Hier  Dim  OutUnit  LongName...
///
/// Example:
/// EmisNO_Total  NO  -1  -1  -1  3  kg/m2/s  NO emission flux (all sectors)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiagnRecord {
    pub name: String,
    pub spec: String,
    pub ext_nr: String,
    pub cat: String,
    pub hier: String,
    pub dim: String,
    pub out_unit: String,
    /// Everything after the seventh column, joined by single spaces.
    pub long_name: String,
}

/// Physical constants of one species.
///
/// Expected columns (whitespace-separated):
/// ID  Symbol  MW  K0  CR  pKA
///
/// Example:
/// 1  NO2  46.0  1e-5  0.0  3.4
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// Leading column. Kept for callers but not written out.
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "MW")]
    pub mw: String,
    #[serde(rename = "K0")]
    pub k0: String,
    #[serde(rename = "CR")]
    pub cr: String,
    #[serde(rename = "pKA")]
    pub pka: String,
}

/// Result of decoding one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Tokens(Vec<String>),
    Diagnostic(DiagnRecord),
    Species { symbol: String, record: SpeciesRecord },
}

impl Decoded {
    /// The token that names the row: first column, diagnostic name, or species symbol.
    pub fn key(&self) -> &str {
        match self {
            Decoded::Tokens(tokens) => tokens.first().map_or("", String::as_str),
            Decoded::Diagnostic(record) => &record.name,
            Decoded::Species { symbol, .. } => symbol,
        }
    }
}

/// Row layouts, one per sectioned dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDecoder {
    /// Keep the raw tokens.
    Generic,
    Diagnostics,
    Species,
}

impl RowDecoder {
    pub const DIAGNOSTICS_COLUMNS: usize = 7;
    pub const SPECIES_COLUMNS: usize = 6;

    /// Minimum number of tokens a row must carry.
    pub fn arity(self) -> usize {
        match self {
            RowDecoder::Generic => 1,
            RowDecoder::Diagnostics => Self::DIAGNOSTICS_COLUMNS,
            RowDecoder::Species => Self::SPECIES_COLUMNS,
        }
    }

    pub fn decode(self, tokens: &[&str]) -> Result<Decoded, SchemaError> {
        let expected = self.arity();
        if tokens.len() < expected {
            return Err(SchemaError {
                expected,
                found: tokens.len(),
            });
        }

        let col = |i: usize| tokens[i].to_string();

        let decoded = match self {
            RowDecoder::Generic => Decoded::Tokens(tokens.iter().map(|t| t.to_string()).collect()),
            RowDecoder::Diagnostics => Decoded::Diagnostic(DiagnRecord {
                name: col(0),
                spec: col(1),
                ext_nr: col(2),
                cat: col(3),
                hier: col(4),
                dim: col(5),
                out_unit: col(6),
                long_name: tokens[Self::DIAGNOSTICS_COLUMNS..].join(" "),
            }),
            RowDecoder::Species => Decoded::Species {
                symbol: col(1),
                record: SpeciesRecord {
                    id: col(0),
                    mw: col(2),
                    k0: col(3),
                    cr: col(4),
                    pka: col(5),
                },
            },
        };

        Ok(decoded)
    }
}
