use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{info, warn};

use crate::error::CollectionError;
use crate::record::{Record, Status};

use super::{read_if_exists, resolve_path, write_atomically, PersistenceFormat, PersistenceStrategy};

pub const CSV_HEADER: [&str; 7] = ["ID", "Title", "Author", "Year", "Category", "Rating", "Status"];

/// Comma-separated file with a fixed header row and one row per record.
///
/// Loading is row-tolerant: a short or unparseable row is logged and skipped
/// while the remaining rows still load.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvPersistence;

impl CsvPersistence {
    pub fn new() -> Self {
        CsvPersistence
    }
}

impl PersistenceStrategy for CsvPersistence {
    fn format(&self) -> PersistenceFormat {
        PersistenceFormat::Csv
    }

    fn save(&self, records: &[Record], path: &Path) -> Result<PathBuf, CollectionError> {
        let path = resolve_path(path, self.format().extension())?;
        let contents = encode(records).map_err(|e| CollectionError::io(&path, e))?;
        write_atomically(&path, &contents)?;
        info!(path = %path.display(), count = records.len(), "saved collection as CSV");
        Ok(path)
    }

    fn load(&self, path: &Path) -> Result<Vec<Record>, CollectionError> {
        let path = resolve_path(path, self.format().extension())?;
        let Some(contents) = read_if_exists(&path)? else {
            info!(path = %path.display(), "file not found, starting with an empty collection");
            return Ok(Vec::new());
        };
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(contents.as_bytes());

        let mut records = Vec::new();
        for row in reader.records() {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable CSV row");
                    continue;
                }
            };
            let line = row.position().map_or(0, |position| position.line());
            if row.len() < CSV_HEADER.len() {
                warn!(line, columns = row.len(), content = %join(&row), "skipping incomplete CSV row");
                continue;
            }
            match row_to_record(&row) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    warn!(line, %reason, content = %join(&row), "skipping invalid CSV row");
                }
            }
        }

        info!(path = %path.display(), count = records.len(), "loaded collection from CSV");
        Ok(records)
    }
}

fn encode(records: &[Record]) -> Result<Vec<u8>, io::Error> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for record in records {
        let year = record.year().to_string();
        let rating = record.rating().to_string();
        writer.write_record([
            record.id(),
            record.title(),
            record.author(),
            &year,
            record.category(),
            &rating,
            record.status().as_str(),
        ])?;
    }
    writer.into_inner().map_err(|e| e.into_error())
}

fn row_to_record(row: &StringRecord) -> Result<Record, String> {
    let year: i32 = row[3]
        .trim()
        .parse()
        .map_err(|_| format!("year {:?} is not a number", &row[3]))?;
    let rating: u8 = row[5]
        .trim()
        .parse()
        .map_err(|_| format!("rating {:?} is not a number", &row[5]))?;
    let status: Status = row[6].trim().parse().map_err(|e| format!("{e}"))?;

    Record::builder()
        .id(&row[0])
        .title(&row[1])
        .author(&row[2])
        .year(year)
        .category(&row[4])
        .rating(rating)
        .status(status)
        .build()
        .map_err(|e| e.to_string())
}

fn join(row: &StringRecord) -> String {
    row.iter().collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn load_str(contents: &str) -> Vec<Record> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.csv");
        fs::write(&path, contents).unwrap();
        CsvPersistence::new().load(&path).unwrap()
    }

    #[test]
    fn quotes_only_when_needed() {
        let record = Record::builder()
            .id("1")
            .title("say \"hi\"")
            .author("a,b")
            .year(2001)
            .category("two\nlines")
            .rating(3)
            .status(Status::Watched)
            .build()
            .unwrap();
        let out = String::from_utf8(encode(&[record]).unwrap()).unwrap();
        assert_eq!(
            out,
            "ID,Title,Author,Year,Category,Rating,Status\n\
             1,\"say \"\"hi\"\"\",\"a,b\",2001,\"two\nlines\",3,Watched\n"
        );
    }

    #[test]
    fn reads_quoted_fields_bom_and_crlf() {
        let records = load_str(
            "\u{feff}ID,Title,Author,Year,Category,Rating,Status\r\n\
             1,\"Heat, the movie\",\"Michael \"\"M\"\" Mann\",1995,\"Crime\nDrama\",5,Watched\r\n\
             \r\n\
             2,Up,Docter,2009,,4,ToWatch",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title(), "Heat, the movie");
        assert_eq!(records[0].author(), "Michael \"M\" Mann");
        assert_eq!(records[0].category(), "Crime\nDrama");
        assert_eq!(records[1].category(), "");
    }

    #[test]
    fn header_is_written_first() {
        let dir = TempDir::new().unwrap();
        let path = CsvPersistence::new()
            .save(&[], &dir.path().join("movies"))
            .unwrap();
        assert_eq!(path, dir.path().join("movies.csv"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "ID,Title,Author,Year,Category,Rating,Status\n"
        );
    }

    #[test]
    fn header_only_and_empty_files_load_as_empty() {
        assert!(load_str("").is_empty());
        assert!(load_str("ID,Title,Author,Year,Category,Rating,Status\n").is_empty());
    }

    #[test]
    fn bad_rows_are_skipped_individually() {
        let records = load_str(
            "ID,Title,Author,Year,Category,Rating,Status\n\
             1,Heat,Mann,1995,Crime,5,Watched\n\
             2,Short,Row\n\
             3,Alien,Scott,nineteen,Horror,4,Watched\n\
             4,Alien,Scott,1979,Horror,x,Watched\n\
             5,Alien,Scott,1979,Horror,4,Seen\n\
             6,,Scott,1979,Horror,4,Watched\n\
             7,Up,Docter,2009,Animation,4,ToWatch\n",
        );
        let ids: Vec<&str> = records.iter().map(Record::id).collect();
        assert_eq!(ids, vec!["1", "7"]);
        assert_eq!(records[1].status(), Status::ToWatch);
    }

    #[test]
    fn stray_quote_inside_a_field_does_not_swallow_later_rows() {
        let records = load_str(
            "ID,Title,Author,Year,Category,Rating,Status\n\
             a,Heat,Mann,1995,Crime,5,Watched\n\
             b,The 12\" Single,Someone,1984,Music,3,Watched\n\
             c,Up,Docter,2009,Animation,4,ToWatch\n\
             d,Alien,Scott,1979,Horror,4,Watched\n",
        );
        let ids: Vec<&str> = records.iter().map(Record::id).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(records[1].title(), "The 12\" Single");
    }
}
