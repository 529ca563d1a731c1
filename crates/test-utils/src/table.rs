//! Parsing of generated fixture tables.
//!
//! Checks the exact line grammar produced by the generator and turns record
//! lines back into values so tests can make assertions about them.

/// One parsed record line: `(field name, raw value)` for each of the four
/// fields, in written order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub fields: Vec<(String, String)>,
}

impl ParsedRecord {
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// An integer input field, unwrapping `marker(...)` if present.
    pub fn degrees(&self, name: &str) -> Option<i32> {
        let raw = self.raw(name)?;
        let inner = match raw.find('(') {
            Some(open) => raw[open + 1..].strip_suffix(')')?,
            None => raw,
        };
        inner.parse().ok()
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.raw(name)?.parse().ok()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(n, _)| n.as_str()).collect()
    }
}

/// A parsed table.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub package: String,
    pub directive: Option<String>,
    pub name: String,
    pub records: Vec<ParsedRecord>,
}

/// Parse a complete generated table, failing on any deviation from the
/// expected layout.
pub fn parse_table(text: &str) -> Result<ParsedTable, String> {
    if !text.ends_with(")\n") {
        return Err("table must end with ')\\n'".to_string());
    }
    let mut it = text.lines();

    let package = it
        .next()
        .and_then(|l| l.strip_prefix("package "))
        .ok_or("missing package line")?
        .to_string();
    expect(it.next(), "")?;

    let mut line = it.next().ok_or("missing declaration")?;
    let mut directive = None;
    if let Some(command) = line.strip_prefix("//go:generate ") {
        directive = Some(command.to_string());
        expect(it.next(), "")?;
        line = it.next().ok_or("missing declaration")?;
    }
    if line != "var (" {
        return Err(format!("expected 'var (', got {:?}", line));
    }

    let name = it
        .next()
        .and_then(|l| l.strip_prefix('\t'))
        .and_then(|l| l.strip_suffix(" = []struct{"))
        .ok_or("missing struct declaration")?
        .to_string();
    for _ in 0..2 {
        let field_line = it.next().ok_or("missing field declaration")?;
        if !field_line.starts_with("\t\t") || field_line.split_whitespace().count() != 3 {
            return Err(format!("bad field declaration {:?}", field_line));
        }
    }
    expect(it.next(), "\t}{")?;

    let mut records = Vec::new();
    let mut closed = false;
    for line in it.by_ref() {
        if line == "\t}" {
            closed = true;
            break;
        }
        records.push(parse_record_line(line)?);
    }
    if !closed {
        return Err("missing closing '\\t}'".to_string());
    }
    expect(it.next(), ")")?;
    if let Some(extra) = it.next() {
        return Err(format!("trailing content {:?}", extra));
    }

    Ok(ParsedTable {
        package,
        directive,
        name,
        records,
    })
}

/// Parse one `\t\t{a: 1, b: 2, e: 3.000000, n: 4.000000},` line.
pub fn parse_record_line(line: &str) -> Result<ParsedRecord, String> {
    let body = line
        .strip_prefix("\t\t{")
        .and_then(|l| l.strip_suffix("},"))
        .ok_or_else(|| format!("bad record line {:?}", line))?;

    let fields = body
        .split(", ")
        .map(|pair| {
            pair.split_once(": ")
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .ok_or_else(|| format!("bad field {:?} in {:?}", pair, line))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if fields.len() != 4 {
        return Err(format!("expected 4 fields in {:?}", line));
    }
    for (_, value) in &fields[2..] {
        let decimals = value.split_once('.').map(|(_, d)| d.len());
        if decimals != Some(6) {
            return Err(format!("expected 6 fractional digits, got {:?}", value));
        }
    }
    Ok(ParsedRecord { fields })
}

fn expect(line: Option<&str>, wanted: &str) -> Result<(), String> {
    match line {
        Some(l) if l == wanted => Ok(()),
        other => Err(format!("expected {:?}, got {:?}", wanted, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "package proj\n\nvar (\n\tt = []struct{\n\t\tlon, lat float64\n\t\te, n     float64\n\t}{\n\t\t{lon: -10, lat: 0, e: 1.500000, n: -2.000000},\n\t}\n)\n";

    #[test]
    fn test_parse_table() {
        let table = parse_table(TABLE).unwrap();
        assert_eq!(table.package, "proj");
        assert_eq!(table.directive, None);
        assert_eq!(table.name, "t");
        assert_eq!(table.records.len(), 1);

        let record = &table.records[0];
        assert_eq!(record.field_names(), vec!["lon", "lat", "e", "n"]);
        assert_eq!(record.degrees("lon"), Some(-10));
        assert_eq!(record.float("e"), Some(1.5));
    }

    #[test]
    fn test_radians_marker_unwrapped() {
        let record = parse_record_line("\t\t{lat: rad(40), lon: rad(-170), e: 0.000000, n: 0.000000},").unwrap();
        assert_eq!(record.degrees("lat"), Some(40));
        assert_eq!(record.degrees("lon"), Some(-170));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(parse_table(&TABLE.replace("\t}\n)\n", "")).is_err());
        assert!(parse_table(&format!("{}extra\n", TABLE)).is_err());
        assert!(parse_record_line("\t\t{lon: 1, lat: 2, e: 3.0, n: 4.000000},").is_err());
        assert!(parse_record_line("{lon: 1, lat: 2, e: 3.000000, n: 4.000000}").is_err());
    }
}
