//! Main store implementation.
//!
//! The table is a plain CSV file with the header `date,start,end,hours`.
//! Rows are only ever appended; nothing here rewrites or deletes existing
//! content.
//!
//! There is no file lock. Two processes appending at the same time may
//! interleave or lose rows, so a table must have a single writer.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use tracing::{debug, info};

use sleeplog_types::format::{format_hours, parse_clock, parse_date, parse_hours};
use sleeplog_types::{COLUMNS, ParseResult, SleepRecord};

use crate::error::{Error, Result};
use crate::queries::RecordQuery;

/// CSV-backed store for completed sleep sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Open the table at `path`, creating it with a header if absent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening sleep log at {}", path.display());
        ensure_initialized(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in file order.
    pub fn load_all(&self) -> Result<Vec<SleepRecord>> {
        load_all(&self.path)
    }

    /// Append one completed session.
    pub fn append(&self, record: &SleepRecord) -> Result<()> {
        append(&self.path, record)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize> {
        Ok(self.load_all()?.len())
    }

    /// Load the records matching `query`.
    pub fn query(&self, query: &RecordQuery) -> Result<Vec<SleepRecord>> {
        debug!("Executing query: {:?}", query);
        Ok(query.apply(self.load_all()?))
    }
}

/// Create the table with its header unless it already holds content.
///
/// Parent directories are created as needed. Returns `true` when the header
/// was written, `false` when the file already existed.
pub fn ensure_initialized(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => return Ok(false),
        Ok(_) => debug!("Sleep log {} is empty, writing header", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(path, e)),
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let header = format!("{}\n", COLUMNS.join(","));
    fs::write(path, header).map_err(|e| Error::io(path, e))?;
    info!("Created sleep log at {}", path.display());
    Ok(true)
}

/// Read every record of the table at `path`, in file order.
///
/// A missing, empty or header-only file yields no records.
pub fn load_all(path: &Path) -> Result<Vec<SleepRecord>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Sleep log {} does not exist yet", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);
    let headers = reader.headers().map_err(|e| Error::csv(path, e))?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let columns = ColumnIndex::from_headers(path, &headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| Error::csv(path, e))?;
        let record = columns.parse(&row).map_err(|source| Error::MalformedRow {
            path: path.to_path_buf(),
            line: row.position().map_or(0, |p| p.line()),
            source,
        })?;
        records.push(record);
    }

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Append `record` as a new trailing row of the table at `path`.
///
/// The table is initialized first if absent. Existing bytes are left
/// untouched; a missing final newline is added before the new row. Fields
/// are written in the order of the file's own header.
pub fn append(path: &Path, record: &SleepRecord) -> Result<()> {
    ensure_initialized(path)?;
    let headers = read_headers(path)?;
    let columns = ColumnIndex::from_headers(path, &headers)?;

    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    if !ends_with_newline(&mut file).map_err(|e| Error::io(path, e))? {
        file.write_all(b"\n").map_err(|e| Error::io(path, e))?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);
    writer
        .write_record(columns.row(headers.len(), record))
        .map_err(|e| Error::csv(path, e))?;
    writer.flush().map_err(|e| Error::io(path, e))?;

    info!("Appended sleep record {} to {}", record, path.display());
    Ok(())
}

fn read_headers(path: &Path) -> Result<StringRecord> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(file);
    Ok(reader.headers().map_err(|e| Error::csv(path, e))?.clone())
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Positions of the four record columns within a header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    start: usize,
    end: usize,
    hours: usize,
}

impl ColumnIndex {
    fn from_headers(path: &Path, headers: &StringRecord) -> Result<Self> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(column))
                .ok_or_else(|| Error::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };
        Ok(Self {
            date: find(COLUMNS[0])?,
            start: find(COLUMNS[1])?,
            end: find(COLUMNS[2])?,
            hours: find(COLUMNS[3])?,
        })
    }

    fn parse(&self, row: &StringRecord) -> ParseResult<SleepRecord> {
        let field = |index: usize| row.get(index).unwrap_or("");
        Ok(SleepRecord::new(
            parse_date(field(self.date))?,
            parse_clock(field(self.start))?,
            parse_clock(field(self.end))?,
            parse_hours(field(self.hours))?,
        ))
    }

    /// Lay out `record` in header order; unknown columns stay empty.
    fn row(&self, width: usize, record: &SleepRecord) -> Vec<String> {
        let mut row = vec![String::new(); width];
        row[self.date] = record.date_string();
        row[self.start] = record.start_string();
        row[self.end] = record.end_string();
        row[self.hours] = format_hours(record.hours);
        row
    }
}
