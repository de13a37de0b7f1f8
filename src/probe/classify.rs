//! Keyword classification of probe responses.

use super::Classification;

/// Marker lists that decide a probe's classification.
#[derive(Debug, Clone)]
pub struct Markers {
    /// Any of these means the identifier has nothing on record
    pub clear: &'static [&'static str],
    /// Any of these means the identifier has something on record
    pub flagged: &'static [&'static str],
    /// Classification when no marker matches
    pub otherwise: Classification,
}

/// Classifies a response body; returns the classification and a short note.
///
/// Matching is case-insensitive. Clear markers are checked first, so a page
/// that says both "SIN DEUDA" and "Total de Deuda" is clear.
pub fn classify(body: &str, markers: &Markers) -> (Classification, String) {
    let haystack = body.to_lowercase();
    let find = |list: &[&'static str]| {
        list.iter()
            .copied()
            .find(|marker| haystack.contains(&marker.to_lowercase()))
    };

    if let Some(marker) = find(markers.clear) {
        return (Classification::Clear, format!("matched \"{marker}\""));
    }
    if let Some(marker) = find(markers.flagged) {
        return (Classification::Flagged, format!("matched \"{marker}\""));
    }
    (markers.otherwise, "no known marker in response".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARBA_LIKE: Markers = Markers {
        clear: &["No registra deuda", "SIN DEUDA"],
        flagged: &["Total de Deuda"],
        otherwise: Classification::ManualReviewRequired,
    };

    #[test]
    fn test_clear_marker_any_case() {
        let (class, note) = classify("<p>El contribuyente NO REGISTRA DEUDA</p>", &ARBA_LIKE);
        assert_eq!(class, Classification::Clear);
        assert!(note.contains("No registra deuda"));
        assert_eq!(classify("estado: sin deuda", &ARBA_LIKE).0, Classification::Clear);
    }

    #[test]
    fn test_flagged_marker() {
        let (class, _) = classify("<td>Total de Deuda</td><td>$ 1.200,00</td>", &ARBA_LIKE);
        assert_eq!(class, Classification::Flagged);
    }

    #[test]
    fn test_clear_takes_precedence() {
        let body = "Total de Deuda: $ 0,00 - SIN DEUDA";
        assert_eq!(classify(body, &ARBA_LIKE).0, Classification::Clear);
    }

    #[test]
    fn test_no_marker_uses_fallback() {
        let (class, note) = classify("<html>mantenimiento</html>", &ARBA_LIKE);
        assert_eq!(class, Classification::ManualReviewRequired);
        assert_eq!(note, "no known marker in response");

        let registered = Markers {
            clear: &["No se registran datos", "inexistente"],
            flagged: &[],
            otherwise: Classification::Flagged,
        };
        assert_eq!(
            classify("Contribuyente activo", &registered).0,
            Classification::Flagged
        );
        assert_eq!(
            classify("CUIT inexistente", &registered).0,
            Classification::Clear
        );
    }
}
