//! Go source rendering for fixture tables.
//!
//! Output layout:
//!
//! ```text
//! package proj
//!
//! //go:generate generate-testdata --preset epsg3857 epsg3857_test.go
//!
//! var (
//! 	epsg3857TestData = []struct{
//! 		lat, lon float64
//! 		e, n     float64
//! 	}{
//! 		{lat: radians(-80), lon: radians(-180), e: -20037508.342789, n: -15538711.096309},
//! 	}
//! )
//! ```
//!
//! The `//go:generate` line and the blank line after it are only written
//! when a directive is set.

use crate::config::{AxisOrder, InputRendering, TableStyle};
use crate::record::FixtureRecord;

/// Renders the header, record lines and footer of one table.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    style: TableStyle,
    field_order: AxisOrder,
    input_rendering: InputRendering,
    directive: Option<String>,
}

impl TableRenderer {
    pub fn new(style: TableStyle, field_order: AxisOrder, input_rendering: InputRendering) -> Self {
        Self {
            style,
            field_order,
            input_rendering,
            directive: None,
        }
    }

    /// Emit a `//go:generate <command>` line in the header.
    pub fn with_directive(mut self, command: Option<String>) -> Self {
        self.directive = command;
        self
    }

    /// Names of the two input fields, in record order.
    fn input_fields(&self) -> (&str, &str) {
        self.field_order
            .arrange(self.style.lon_field.as_str(), self.style.lat_field.as_str())
    }

    pub fn header(&self) -> String {
        let (first, second) = self.input_fields();
        let inputs = format!("{}, {}", first, second);
        let outputs = format!("{}, {}", self.style.easting_field, self.style.northing_field);
        let width = inputs.len().max(outputs.len());

        let mut header = format!("package {}\n\n", self.style.package);
        if let Some(command) = &self.directive {
            header.push_str(&format!("//go:generate {}\n\n", command));
        }
        header.push_str("var (\n");
        header.push_str(&format!("\t{} = []struct{{\n", self.style.name));
        header.push_str(&format!("\t\t{:<width$} {}\n", inputs, self.style.field_type, width = width));
        header.push_str(&format!("\t\t{:<width$} {}\n", outputs, self.style.field_type, width = width));
        header.push_str("\t}{\n");
        header
    }

    pub fn record_line(&self, record: &FixtureRecord) -> String {
        let (first, second) = self.input_fields();
        let (first_value, second_value) = self.field_order.arrange(record.lon, record.lat);
        format!(
            "\t\t{{{}: {}, {}: {}, {}: {}, {}: {}}},\n",
            first,
            self.input_value(first_value),
            second,
            self.input_value(second_value),
            self.style.easting_field,
            self.output_value(record.easting),
            self.style.northing_field,
            self.output_value(record.northing),
        )
    }

    fn output_value(&self, value: f64) -> String {
        if self.style.signed_zero {
            format!("{:.6}", value)
        } else {
            fixed6(value)
        }
    }

    pub fn footer(&self) -> String {
        "\t}\n)\n".to_string()
    }

    fn input_value(&self, degrees: i32) -> String {
        match self.input_rendering {
            InputRendering::Degrees => degrees.to_string(),
            InputRendering::Radians => format!("{}({})", self.style.radians_marker, degrees),
        }
    }
}

/// Six fractional digits. Values that round to zero are written without a
/// sign.
pub fn fixed6(value: f64) -> String {
    let formatted = format!("{:.6}", value);
    match formatted.strip_prefix('-') {
        Some(unsigned) if unsigned.bytes().all(|b| b == b'0' || b == b'.') => unsigned.to_string(),
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FixtureRecord {
        FixtureRecord {
            lon: -170,
            lat: 40,
            easting: -18924313.434856,
            northing: 4865942.279503,
        }
    }

    #[test]
    fn test_legacy_header() {
        let renderer = TableRenderer::new(
            TableStyle::new("epsg3857TestData"),
            AxisOrder::LonLat,
            InputRendering::Degrees,
        );
        assert_eq!(
            renderer.header(),
            "package proj\n\nvar (\n\tepsg3857TestData = []struct{\n\t\tlon, lat float64\n\t\te, n     float64\n\t}{\n"
        );
        assert_eq!(renderer.footer(), "\t}\n)\n");
    }

    #[test]
    fn test_header_with_directive() {
        let renderer = TableRenderer::new(
            TableStyle::new("epsg3857TestData"),
            AxisOrder::LatLon,
            InputRendering::Radians,
        )
        .with_directive(Some("generate-testdata epsg3857_test.go".to_string()));
        let header = renderer.header();
        assert!(header.starts_with(
            "package proj\n\n//go:generate generate-testdata epsg3857_test.go\n\nvar (\n"
        ));
        assert!(header.contains("\t\tlat, lon float64\n"));
    }

    #[test]
    fn test_record_line_degrees() {
        let renderer = TableRenderer::new(
            TableStyle::new("t"),
            AxisOrder::LonLat,
            InputRendering::Degrees,
        );
        assert_eq!(
            renderer.record_line(&record()),
            "\t\t{lon: -170, lat: 40, e: -18924313.434856, n: 4865942.279503},\n"
        );
    }

    #[test]
    fn test_record_line_radians_lat_first() {
        let renderer = TableRenderer::new(
            TableStyle::new("t"),
            AxisOrder::LatLon,
            InputRendering::Radians,
        );
        assert_eq!(
            renderer.record_line(&record()),
            "\t\t{lat: radians(40), lon: radians(-170), e: -18924313.434856, n: 4865942.279503},\n"
        );
    }

    #[test]
    fn test_custom_field_names_align() {
        let style = TableStyle {
            easting_field: "easting".to_string(),
            northing_field: "northing".to_string(),
            ..TableStyle::new("t")
        };
        let renderer = TableRenderer::new(style, AxisOrder::LonLat, InputRendering::Degrees);
        let header = renderer.header();
        assert!(header.contains("\t\tlon, lat          float64\n"));
        assert!(header.contains("\t\teasting, northing float64\n"));
    }

    #[test]
    fn test_signed_zero() {
        let origin = FixtureRecord {
            lon: 0,
            lat: 0,
            easting: 0.0,
            northing: -7.081154551613622e-10,
        };
        let unsigned = TableRenderer::new(TableStyle::new("t"), AxisOrder::LonLat, InputRendering::Degrees);
        assert_eq!(
            unsigned.record_line(&origin),
            "\t\t{lon: 0, lat: 0, e: 0.000000, n: 0.000000},\n"
        );

        let style = TableStyle {
            signed_zero: true,
            ..TableStyle::new("t")
        };
        let signed = TableRenderer::new(style, AxisOrder::LonLat, InputRendering::Degrees);
        assert_eq!(
            signed.record_line(&origin),
            "\t\t{lon: 0, lat: 0, e: 0.000000, n: -0.000000},\n"
        );
        assert_eq!(signed.record_line(&record()), unsigned.record_line(&record()));
    }

    #[test]
    fn test_fixed6() {
        assert_eq!(fixed6(0.0), "0.000000");
        assert_eq!(fixed6(-0.0), "0.000000");
        assert_eq!(fixed6(-7.081154551613622e-10), "0.000000");
        assert_eq!(fixed6(-0.0000004), "0.000000");
        assert_eq!(fixed6(-0.0000006), "-0.000001");
        assert_eq!(fixed6(1118889.9748579597), "1118889.974858");
    }
}
