//! Line splitting shared by the hand-written CSV readers

/// Split a CSV line into trimmed fields; double quotes protect commas
#[must_use]
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_protect_commas() {
        let fields = parse_csv_line("a, \"b, c\" ,d");
        assert_eq!(fields, vec!["a", "b, c", "d"]);
    }

    #[test]
    fn test_trailing_empty_field() {
        assert_eq!(parse_csv_line("x,"), vec!["x", ""]);
        assert_eq!(parse_csv_line(""), vec![""]);
    }
}
