/// Marker that was expected in the command but is not there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMarker(pub &'static str);

/// Returns the trimmed text between `start_marker` and the first
/// `end_marker` that follows it.
///
/// Without an end marker, or when it does not occur after the start, the
/// value runs to the end of `input`. Markers are expected in the order they
/// are queried; if a later marker's text shows up before `start_marker`, the
/// result is whatever lies between the two occurrences found.
pub fn extract<'a>(
    input: &'a str,
    start_marker: &'static str,
    end_marker: Option<&str>,
) -> Result<&'a str, MissingMarker> {
    let start = input
        .find(start_marker)
        .ok_or(MissingMarker(start_marker))?
        + start_marker.len();

    let rest = &input[start..];
    let value = match end_marker.and_then(|end| rest.find(end)) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Ok(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_between_markers() {
        let input = "p/Jean doe s/13:00 e/14:00";
        assert_eq!(extract(input, "p/", Some("s/")), Ok("Jean doe"));
        assert_eq!(extract(input, "s/", Some("e/")), Ok("13:00"));
    }

    #[test]
    fn test_extract_to_end_of_input() {
        let input = "mn/paracetamol q/20";
        assert_eq!(extract(input, "q/", None), Ok("20"));
        // end marker only before the start counts as absent
        assert_eq!(extract(input, "q/", Some("mn/")), Ok("20"));
    }

    #[test]
    fn test_missing_start_marker() {
        assert_eq!(extract("p/Jean", "s/", None), Err(MissingMarker("s/")));
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(extract("n/   ", "n/", None), Ok(""));
        assert_eq!(extract("p/ s/13:00", "p/", Some("s/")), Ok(""));
    }

    #[test]
    fn test_out_of_order_markers_follow_first_occurrence() {
        // "s/" inside the name is found first; the result is taken from there
        let input = "p/chris/s s/13:00";
        assert_eq!(extract(input, "s/", None), Ok("s s/13:00"));
    }
}
