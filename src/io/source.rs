//! # Compressed Input Sources
//!
//! Opens a VCF path and returns a decoded line stream. BGZF files (the usual
//! `.vcf.gz` written by bgzip) are read with `noodles::bgzf`; plain gzip falls
//! back to `flate2`. Uncompressed input is rejected: callers that already hold a
//! decoded stream hand it to [`GenotypeReader::from_reader`] directly.
//!
//! [`GenotypeReader::from_reader`]: crate::io::vcf::GenotypeReader::from_reader

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::bgzf;
use tracing::info_span;

use crate::error::{HaploError, Result, Unavailable};

/// Compression detected from the leading bytes of a file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    /// Blocked gzip with a `BC` extra subfield
    Bgzf,
    /// Ordinary (possibly multi-member) gzip
    Gzip,
    /// Anything else
    None,
}

/// Open `path` and wrap it in the matching decoder
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    info_span!("open_input", path = ?path).in_scope(|| -> Result<Box<dyn BufRead + Send>> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(HaploError::unavailable(path, Unavailable::NotFound));
            }
            Err(e) => return Err(e.into()),
        };

        let compression = sniff_compression(&mut file)?;
        tracing::debug!(?compression, "detected input compression");

        match compression {
            Compression::Bgzf => Ok(Box::new(BufReader::new(bgzf::Reader::new(file)))),
            Compression::Gzip => Ok(Box::new(BufReader::new(MultiGzDecoder::new(file)))),
            Compression::None => Err(HaploError::unavailable(path, Unavailable::NotCompressed)),
        }
    })
}

/// Inspect the gzip member header and rewind the file
pub fn sniff_compression<R: Read + Seek>(file: &mut R) -> Result<Compression> {
    let result = detect(file);
    file.seek(SeekFrom::Start(0))?;
    result
}

fn detect<R: Read>(file: &mut R) -> Result<Compression> {
    let mut header = [0u8; 12];
    let n = read_prefix(file, &mut header)?;
    if n < 10 || header[0] != 0x1f || header[1] != 0x8b || header[2] != 0x08 {
        return Ok(Compression::None);
    }

    // FEXTRA flag and XLEN
    let flg = header[3];
    if flg & 0x04 == 0 || n < 12 {
        return Ok(Compression::Gzip);
    }
    let xlen = u16::from_le_bytes([header[10], header[11]]) as usize;
    let mut extra = vec![0u8; xlen];
    if read_prefix(file, &mut extra)? < xlen {
        return Ok(Compression::Gzip);
    }

    let mut i = 0usize;
    while i + 4 <= extra.len() {
        let si1 = extra[i];
        let si2 = extra[i + 1];
        let slen = u16::from_le_bytes([extra[i + 2], extra[i + 3]]) as usize;
        if si1 == b'B' && si2 == b'C' && slen == 2 {
            return Ok(Compression::Bgzf);
        }
        i = i.saturating_add(4 + slen);
    }
    Ok(Compression::Gzip)
}

/// Fill as much of `buf` as the reader allows
fn read_prefix<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    use flate2::write::GzEncoder;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), flate2::Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    fn bgzip(data: &[u8]) -> Vec<u8> {
        let mut writer = bgzf::Writer::new(Vec::new());
        writer.write_all(data).unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_sniff_plain_text() {
        let mut cur = Cursor::new(b"##fileformat=VCFv4.2\n".to_vec());
        assert_eq!(sniff_compression(&mut cur).unwrap(), Compression::None);
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn test_sniff_gzip() {
        let mut cur = Cursor::new(gzip(b"hello\n"));
        assert_eq!(sniff_compression(&mut cur).unwrap(), Compression::Gzip);
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn test_sniff_bgzf() {
        let mut cur = Cursor::new(bgzip(b"hello\n"));
        assert_eq!(sniff_compression(&mut cur).unwrap(), Compression::Bgzf);
    }

    #[test]
    fn test_open_missing_file() {
        let err = open_input(Path::new("/definitely/not/here.vcf.gz")).err().unwrap();
        assert!(matches!(
            err,
            HaploError::InputUnavailable { reason: Unavailable::NotFound, .. }
        ));
    }

    #[test]
    fn test_open_uncompressed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#CHROM\tPOS").unwrap();
        let err = open_input(file.path()).err().unwrap();
        assert!(matches!(
            err,
            HaploError::InputUnavailable { reason: Unavailable::NotCompressed, .. }
        ));
    }

    #[test]
    fn test_open_gzip_roundtrips_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&gzip(b"line one\nline two\n")).unwrap();
        let mut reader = open_input(file.path()).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "line one\n");
    }

    #[test]
    fn test_open_bgzf_and_gzip_decode_alike() {
        let data = b"##fileformat=VCFv4.2\n#CHROM\tPOS\n";
        for bytes in [bgzip(data), gzip(data)] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(&bytes).unwrap();
            let mut reader = open_input(file.path()).unwrap();
            let mut text = String::new();
            reader.read_to_string(&mut text).unwrap();
            assert_eq!(text.as_bytes(), data);
        }
    }
}
