//! Nodal station summarization.
//!
//! Each lymph-node station arrives as a `<station>_positive` /
//! `<station>_total` pair of count fields. The summary lists every station
//! with a non-empty positive count, in sorted key order so the output is
//! reproducible regardless of how the client ordered its fields.

use synoptic_model::FormValues;

const POSITIVE_SUFFIX: &str = "_positive";
const TOTAL_SUFFIX: &str = "_total";
const STATION_PREFIX: &str = "LN";

/// Build the nodal summary, e.g. `"1R (2/5), 7 (1/3)"`.
///
/// Stations without a positive count are skipped entirely; a missing or
/// blank total renders as `?`. Empty string when nothing qualifies.
pub fn summarize_nodal(form: &FormValues) -> String {
    let mut parts = Vec::new();
    for key in form.keys() {
        let Some(base) = key.strip_suffix(POSITIVE_SUFFIX) else {
            continue;
        };
        let positive = form.first_nonempty(key);
        if positive.is_empty() {
            continue;
        }

        let total_key = format!("{base}{TOTAL_SUFFIX}");
        let total = form.first_nonempty(&total_key);
        let total = if total.is_empty() { "?" } else { total };

        let label = base.strip_prefix(STATION_PREFIX).unwrap_or(base);
        parts.push(format!("{label} ({positive}/{total})"));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use synoptic_model::FormValues;

    use super::summarize_nodal;

    #[test]
    fn single_station() {
        let form = FormValues::from_pairs([("LN1R_positive", "2"), ("LN1R_total", "5")]);
        assert_eq!(summarize_nodal(&form), "1R (2/5)");
    }

    #[test]
    fn missing_total_renders_question_mark() {
        let form = FormValues::from_pairs([("LN1R_positive", "2")]);
        assert_eq!(summarize_nodal(&form), "1R (2/?)");
    }

    #[test]
    fn blank_positive_skips_station() {
        let form = FormValues::from_pairs([("LN1R_positive", ""), ("LN1R_total", "5")]);
        assert_eq!(summarize_nodal(&form), "");
    }

    #[test]
    fn stations_sort_by_key_regardless_of_input_order() {
        let form = FormValues::from_pairs([
            ("LN7_positive", "1"),
            ("LN7_total", "3"),
            ("LN10R_positive", "0"),
            ("LN10R_total", "4"),
            ("LN1R_positive", "2"),
            ("LN1R_total", "5"),
        ]);
        assert_eq!(summarize_nodal(&form), "10R (0/4), 1R (2/5), 7 (1/3)");
    }

    #[test]
    fn base_without_station_prefix_is_used_verbatim() {
        let form = FormValues::from_pairs([("hilar_positive", "1")]);
        assert_eq!(summarize_nodal(&form), "hilar (1/?)");
    }

    #[test]
    fn empty_form_yields_empty_summary() {
        assert_eq!(summarize_nodal(&FormValues::new()), "");
    }
}
