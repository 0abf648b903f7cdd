use encoding_rs::WINDOWS_1252;

/// One tabular report as published by the portal: a header row and raw-text
/// data rows. Nothing is coerced or validated; the bytes that came off the
/// wire are what end up on disk, modulo the semicolon CSV framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularPayload {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularPayload {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Parse semicolon-delimited CSV in the portal's Latin-1 encoding.
    /// `flexible` because the portal has shipped ragged rows before and
    /// source fidelity beats strictness here.
    pub fn from_latin1_csv(bytes: &[u8]) -> Result<Self, csv::Error> {
        let (text, _, _) = WINDOWS_1252.decode(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(text.as_bytes());
        let header = reader.headers()?.iter().map(str::to_owned).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_owned).collect());
        }
        Ok(Self { header, rows })
    }

    /// Serialize back to the same wire convention: semicolon delimiter,
    /// header first, Latin-1 bytes, no index column.
    pub fn to_latin1_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut buf = Vec::new();
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_writer(&mut buf);
        writer.write_record(self.header.iter().map(|field| WINDOWS_1252.encode(field).0))?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|field| WINDOWS_1252.encode(field).0))?;
        }
        writer.flush()?;
        drop(writer);
        Ok(buf)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_latin1_semicolon_csv_as_raw_text() {
        // "SITUAÇÃO" in Latin-1; value keeps its leading zeros and comma.
        let bytes = b"CNPJ_FUNDO;SITUA\xc7\xc3O;VL_QUOTA\n00.017.024/0001-53;EM FUNCIONAMENTO;27,2251570\n";
        let payload = TabularPayload::from_latin1_csv(bytes).unwrap();
        assert_eq!(payload.header(), ["CNPJ_FUNDO", "SITUA\u{c7}\u{c3}O", "VL_QUOTA"]);
        assert_eq!(payload.row_count(), 1);
        assert_eq!(
            payload.rows()[0],
            ["00.017.024/0001-53", "EM FUNCIONAMENTO", "27,2251570"]
        );
    }

    #[test]
    fn serializes_back_to_the_same_bytes() {
        let bytes: &[u8] = b"A;B\nfun\xe7\xe3o;007\nx;y\n";
        let payload = TabularPayload::from_latin1_csv(bytes).unwrap();
        assert_eq!(payload.to_latin1_csv().unwrap(), bytes);
    }

    #[test]
    fn tolerates_ragged_rows() {
        let bytes = b"A;B;C\n1;2\n3;4;5;6\n";
        let payload = TabularPayload::from_latin1_csv(bytes).unwrap();
        assert_eq!(payload.rows()[0], ["1", "2"]);
        assert_eq!(payload.rows()[1], ["3", "4", "5", "6"]);
    }
}
