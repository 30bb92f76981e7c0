//! Markup fragments for the faceted selector

/// Inline style of a selector column
pub const COLUMN_STYLE: &str = "width: 150px; float: left; padding: 10px;";

pub const OPEN_CONTAINER: &str = "<div class=\"faceted-select\">";
pub const CLOSE_CONTAINER: &str = "</div>";
pub const CLOSE_COLUMN: &str = "</span>";

/// Escape text for use in element content or a quoted attribute
#[must_use]
pub fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Opening tag of a column plus its header
#[must_use]
pub fn open_column(header: &str) -> String {
    format!(
        "<span class=\"facet-column\" style=\"{COLUMN_STYLE}\"><h3>{}</h3>",
        escape(header)
    )
}

/// A checkbox input
#[must_use]
pub fn checkbox(name: &str, value: &str, id: Option<&str>, checked: bool) -> String {
    let id_attr = id.map(|id| format!(" id=\"{}\"", escape(id))).unwrap_or_default();
    let checked_attr = if checked { " checked=\"checked\"" } else { "" };
    format!(
        "<input type=\"checkbox\" name=\"{}\" value=\"{}\"{id_attr}{checked_attr} />",
        escape(name),
        escape(value)
    )
}

/// One selectable row: a rendered checkbox and its escaped label
///
/// `checkbox` is trusted markup and is embedded as is.
#[must_use]
pub fn option_row(checkbox: &str, label: &str, id: Option<&str>) -> String {
    let for_attr = id.map(|id| format!(" for=\"{}\"", escape(id))).unwrap_or_default();
    format!(
        "<span style=\"display: block\"><label{for_attr}>{checkbox} {}</label></span>",
        escape(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\" 'd'"), "a &lt; b &amp; &quot;c&quot; &#x27;d&#x27;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_escape_ampersand_first() {
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_checkbox_attributes() {
        assert_eq!(
            checkbox("tags", "5", Some("id_tags_0"), true),
            "<input type=\"checkbox\" name=\"tags\" value=\"5\" id=\"id_tags_0\" checked=\"checked\" />"
        );
        assert_eq!(
            checkbox("tags", "5", None, false),
            "<input type=\"checkbox\" name=\"tags\" value=\"5\" />"
        );
    }

    #[test]
    fn test_checkbox_escapes_attribute_values() {
        let markup = checkbox("a\"b", "<v>", None, false);
        assert!(markup.contains("name=\"a&quot;b\""));
        assert!(markup.contains("value=\"&lt;v&gt;\""));
    }

    #[test]
    fn test_option_row_keeps_checkbox_markup() {
        let row = option_row("<input />", "Saw & blade", Some("x_1"));
        assert_eq!(
            row,
            "<span style=\"display: block\"><label for=\"x_1\"><input /> Saw &amp; blade</label></span>"
        );
    }

    #[test]
    fn test_open_column_escapes_header() {
        let column = open_column("<Tools> (Shop)");
        assert!(column.ends_with("<h3>&lt;Tools&gt; (Shop)</h3>"));
        assert!(column.starts_with("<span class=\"facet-column\""));
    }
}
