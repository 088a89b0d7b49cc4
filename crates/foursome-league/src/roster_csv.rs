//! Roster import and export as `Name,Handicap` CSV.
//!
//! Import is forgiving, since rosters are usually pasted from spreadsheets:
//!
//! - blank lines are ignored
//! - the first line is treated as a header if it mentions `name` or `handicap`
//! - only the first two columns are read; extra columns are ignored
//! - a stray pair of single or double quotes around a field is removed
//! - rows without a name or with a handicap that is not a finite number are
//!   skipped and counted
//!
//! ```
//! use foursome_league::roster_csv;
//!
//! let text = "Name,Handicap\nAnn, 4.2\n\n'Bob',11\nbroken row\n";
//! let import = roster_csv::parse(text.as_bytes()).unwrap();
//! assert_eq!(import.entries.len(), 2);
//! assert_eq!(import.skipped, 1);
//! ```

use std::io;

use foursome_core::Player;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum CsvImportError {
    #[display("failed to read CSV input")]
    Read(csv::Error),
    #[display("no valid players found; expected rows of \"Name, Handicap\"")]
    NoValidPlayers,
}

impl From<csv::Error> for CsvImportError {
    fn from(err: csv::Error) -> Self {
        Self::Read(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub handicap: f64,
}

/// Result of a successful [`parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct RosterImport {
    /// Valid rows, in input order
    pub entries: Vec<RosterEntry>,
    /// Number of non-blank data rows that were ignored
    pub skipped: usize,
}

pub fn parse<R>(reader: R) -> Result<RosterImport, CsvImportError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = vec![];
    let mut skipped = 0;
    let mut seen_first_line = false;
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if !seen_first_line {
            seen_first_line = true;
            if is_header(&record) {
                continue;
            }
        }

        match parse_entry(&record) {
            Some(entry) => entries.push(entry),
            None => {
                let line = record.position().map(csv::Position::line);
                tracing::warn!(?line, "skipping invalid roster row");
                skipped += 1;
            }
        }
    }

    if entries.is_empty() {
        return Err(CsvImportError::NoValidPlayers);
    }
    Ok(RosterImport { entries, skipped })
}

pub fn write<W>(players: &[Player], writer: W) -> Result<(), csv::Error>
where
    W: io::Write,
{
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["Name", "Handicap"])?;
    for player in players {
        let handicap = player.handicap.to_string();
        writer.write_record([player.name.as_str(), handicap.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn is_header(record: &csv::StringRecord) -> bool {
    record.iter().any(|field| {
        let field = field.to_lowercase();
        field.contains("name") || field.contains("handicap")
    })
}

fn parse_entry(record: &csv::StringRecord) -> Option<RosterEntry> {
    let name = strip_quotes(record.get(0)?);
    let handicap = strip_quotes(record.get(1)?).parse::<f64>().ok()?;
    if name.is_empty() || !handicap.is_finite() {
        return None;
    }
    Some(RosterEntry {
        name: name.to_owned(),
        handicap,
    })
}

fn strip_quotes(field: &str) -> &str {
    let field = field.strip_prefix(['"', '\'']).unwrap_or(field);
    let field = field.strip_suffix(['"', '\'']).unwrap_or(field);
    field.trim()
}
