//! Sort rules: validated, typed comparisons over extracted keys
//!
//! A [`SortRule`] is built from a [`SortRuleConfig`] by
//! [`SortRule::from_config`], which rejects rules that could never order
//! anything (unknown capture group, unusable timestamp layout, unknown time
//! zone). Once built, a rule always produces an order: keys that cannot be
//! parsed take the lowest possible value and are reported alongside.
//!
//! `ascending = false` (the default) puts the highest number, the last string
//! and the newest timestamp first.

use chrono::format::{self, Item, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::criteria::{SortRuleConfig, SortType};
use crate::error::RuleError;
use crate::extract::KeyExtractor;

/// A validated sort rule
#[derive(Debug, Clone, PartialEq)]
pub struct SortRule {
    index: usize,
    group: String,
    ascending: bool,
    kind: RuleKind,
}

/// Per-type behaviour of a sort rule
#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    Numeric,
    Alphabetical,
    Timestamp { layout: String, location: Tz },
}

/// Comparable key extracted from one file
///
/// `None` is the fallback for unparsable or missing keys and orders below
/// every parsed value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Numeric(Option<i64>),
    Alphabetical(String),
    Timestamp(Option<DateTime<Utc>>),
}

impl SortRule {
    /// Validate a configured rule against the extraction regex
    ///
    /// `index` is the rule's position in `sort_by` and is carried into every
    /// error the rule reports.
    pub fn from_config(
        index: usize,
        config: &SortRuleConfig,
        extractor: &KeyExtractor,
    ) -> Result<Self, RuleError> {
        if !extractor.has_group(&config.regex_key) {
            return Err(RuleError::UnknownGroup {
                index,
                sort_type: config.sort_type,
                group: config.regex_key.clone(),
            });
        }

        let kind = match config.sort_type {
            SortType::Numeric => RuleKind::Numeric,
            SortType::Alphabetical => RuleKind::Alphabetical,
            SortType::Timestamp => {
                let layout = match config.layout.as_deref() {
                    None | Some("") => return Err(RuleError::MissingLayout { index }),
                    Some(layout) => layout,
                };
                if !is_usable_layout(layout) {
                    return Err(RuleError::InvalidLayout {
                        index,
                        layout: layout.to_string(),
                    });
                }

                let location = match config.location.as_deref() {
                    None | Some("") => Tz::UTC,
                    Some(name) => name.parse::<Tz>().map_err(|_| RuleError::UnknownLocation {
                        index,
                        location: name.to_string(),
                    })?,
                };

                RuleKind::Timestamp {
                    layout: layout.to_string(),
                    location,
                }
            }
        };

        Ok(Self {
            index,
            group: config.regex_key.clone(),
            ascending: config.ascending,
            kind,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn ascending(&self) -> bool {
        self.ascending
    }

    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    pub fn sort_type(&self) -> SortType {
        match self.kind {
            RuleKind::Numeric => SortType::Numeric,
            RuleKind::Alphabetical => SortType::Alphabetical,
            RuleKind::Timestamp { .. } => SortType::Timestamp,
        }
    }

    /// Extract and parse the key of one file
    ///
    /// On failure the fallback key is returned together with the error.
    pub fn key(&self, extractor: &KeyExtractor, path: &Path) -> (SortKey, Option<RuleError>) {
        let raw = extractor.key_for_path(path, &self.group);

        match &self.kind {
            RuleKind::Alphabetical => (
                SortKey::Alphabetical(raw.unwrap_or_default().to_string()),
                None,
            ),
            RuleKind::Numeric => match raw {
                None => (SortKey::Numeric(None), Some(self.missing_key(path))),
                Some(text) => match text.parse::<i64>() {
                    Ok(value) => (SortKey::Numeric(Some(value)), None),
                    Err(e) => (
                        SortKey::Numeric(None),
                        Some(self.key_parse(path, text, e.to_string())),
                    ),
                },
            },
            RuleKind::Timestamp { layout, location } => match raw {
                None => (SortKey::Timestamp(None), Some(self.missing_key(path))),
                Some(text) => match parse_timestamp(text, layout, *location) {
                    Ok(instant) => (SortKey::Timestamp(Some(instant)), None),
                    Err(reason) => (
                        SortKey::Timestamp(None),
                        Some(self.key_parse(path, text, reason)),
                    ),
                },
            },
        }
    }

    /// Order two keys according to the rule's direction
    pub fn compare(&self, a: &SortKey, b: &SortKey) -> Ordering {
        if self.ascending {
            a.cmp(b)
        } else {
            b.cmp(a)
        }
    }

    /// Stable-sort `files` by this rule
    ///
    /// Every file is ordered, including those whose key failed to parse; the
    /// failures are returned next to the new order.
    pub fn sort(
        &self,
        extractor: &KeyExtractor,
        files: &[PathBuf],
    ) -> (Vec<PathBuf>, Vec<RuleError>) {
        let mut errors = Vec::new();
        let mut keyed: Vec<(SortKey, &PathBuf)> = files
            .iter()
            .map(|path| {
                let (key, error) = self.key(extractor, path);
                errors.extend(error);
                (key, path)
            })
            .collect();

        // slice::sort_by is stable, which the cascade in `ordering` relies on
        keyed.sort_by(|(a, _), (b, _)| self.compare(a, b));

        (
            keyed.into_iter().map(|(_, path)| path.clone()).collect(),
            errors,
        )
    }

    fn missing_key(&self, path: &Path) -> RuleError {
        RuleError::MissingKey {
            index: self.index,
            sort_type: self.sort_type(),
            group: self.group.clone(),
            file: path.to_path_buf(),
        }
    }

    fn key_parse(&self, path: &Path, key: &str, reason: String) -> RuleError {
        RuleError::KeyParse {
            index: self.index,
            sort_type: self.sort_type(),
            file: path.to_path_buf(),
            key: key.to_string(),
            reason,
        }
    }
}

/// A layout must be valid strftime and contain at least one field
fn is_usable_layout(layout: &str) -> bool {
    let mut has_field = false;
    for item in StrftimeItems::new(layout) {
        match item {
            Item::Error => return false,
            Item::Numeric(..) | Item::Fixed(..) => has_field = true,
            _ => {}
        }
    }
    has_field
}

/// Parse `text` with `layout`, reading zone-less values in `location`
fn parse_timestamp(text: &str, layout: &str, location: Tz) -> Result<DateTime<Utc>, String> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, text, StrftimeItems::new(layout)).map_err(|e| e.to_string())?;
    fill_missing_fields(&mut parsed).map_err(|e| e.to_string())?;

    if parsed.offset().is_some() {
        return parsed
            .to_datetime()
            .map(|with_offset| with_offset.with_timezone(&Utc))
            .map_err(|e| e.to_string());
    }

    let naive = parsed
        .to_naive_datetime_with_offset(0)
        .map_err(|e| e.to_string())?;

    location
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| format!("{naive} does not exist in {location}"))
}

/// Fields finer than the layout reads take their zero value: January, the
/// first of the month, midnight.
fn fill_missing_fields(parsed: &mut Parsed) -> ParseResult<()> {
    if parsed.timestamp().is_some() {
        return Ok(());
    }

    let week_or_ordinal = parsed.ordinal().is_some()
        || parsed.isoweek().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some();
    if !week_or_ordinal {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        // %I without %p reads as AM
        (None, Some(_)) => parsed.set_ampm(false)?,
        _ => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_numeric_descending_is_not_lexicographic() {
        let extractor = KeyExtractor::new(r"^app\.log\.(?P<n>\d+)$").unwrap();
        let rule = SortRule::from_config(0, &SortRuleConfig::numeric("n"), &extractor).unwrap();

        let (sorted, errors) = rule.sort(&extractor, &paths(&["app.log.2", "app.log.10", "app.log.1"]));
        assert!(errors.is_empty());
        assert_eq!(names(&sorted), ["app.log.10", "app.log.2", "app.log.1"]);
    }

    #[test]
    fn test_numeric_ascending() {
        let extractor = KeyExtractor::new(r"^app\.log\.(?P<n>\d+)$").unwrap();
        let config = SortRuleConfig::numeric("n").with_ascending(true);
        let rule = SortRule::from_config(0, &config, &extractor).unwrap();

        let (sorted, _) = rule.sort(&extractor, &paths(&["app.log.2", "app.log.10", "app.log.1"]));
        assert_eq!(names(&sorted), ["app.log.1", "app.log.2", "app.log.10"]);
    }

    #[test]
    fn test_numeric_unparsable_falls_to_lowest() {
        let extractor = KeyExtractor::new(r"^app\.log\.(?P<n>\w+)$").unwrap();
        let rule = SortRule::from_config(4, &SortRuleConfig::numeric("n"), &extractor).unwrap();

        let (sorted, errors) = rule.sort(
            &extractor,
            &paths(&["app.log.old", "app.log.3", "unrelated.txt", "app.log.7"]),
        );
        assert_eq!(
            names(&sorted),
            ["app.log.7", "app.log.3", "app.log.old", "unrelated.txt"]
        );
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            &errors[0],
            RuleError::KeyParse { index: 4, key, .. } if key == "old"
        ));
        assert!(matches!(&errors[1], RuleError::MissingKey { group, .. } if group == "n"));
    }

    #[test]
    fn test_numeric_accepts_sign() {
        let extractor = KeyExtractor::new(r"^v(?P<n>[-+]?\d+)$").unwrap();
        let rule = SortRule::from_config(0, &SortRuleConfig::numeric("n"), &extractor).unwrap();

        let (key, error) = rule.key(&extractor, Path::new("v-3"));
        assert_eq!(key, SortKey::Numeric(Some(-3)));
        assert!(error.is_none());
    }

    #[test]
    fn test_alphabetical_missing_key_is_empty_string() {
        let extractor = KeyExtractor::new(r"\.(?P<suffix>[a-z])\.log$").unwrap();
        let rule =
            SortRule::from_config(0, &SortRuleConfig::alphabetical("suffix"), &extractor).unwrap();

        let (sorted, errors) = rule.sort(&extractor, &paths(&["x.log", "s.b.log", "s.a.log"]));
        assert!(errors.is_empty());
        assert_eq!(names(&sorted), ["s.b.log", "s.a.log", "x.log"]);

        let ascending = SortRule::from_config(
            0,
            &SortRuleConfig::alphabetical("suffix").with_ascending(true),
            &extractor,
        )
        .unwrap();
        let (sorted, _) = ascending.sort(&extractor, &paths(&["s.b.log", "x.log", "s.a.log"]));
        assert_eq!(names(&sorted), ["x.log", "s.a.log", "s.b.log"]);
    }

    #[test]
    fn test_alphabetical_is_bytewise() {
        let extractor = KeyExtractor::new(r"^(?P<name>.+)\.log$").unwrap();
        let config = SortRuleConfig::alphabetical("name").with_ascending(true);
        let rule = SortRule::from_config(0, &config, &extractor).unwrap();

        let (sorted, _) = rule.sort(&extractor, &paths(&["b.log", "B.log", "a.log"]));
        assert_eq!(names(&sorted), ["B.log", "a.log", "b.log"]);
    }

    #[test]
    fn test_timestamp_newest_first() {
        let extractor = KeyExtractor::new(r"^app-(?P<date>\d{8})\.log$").unwrap();
        let config = SortRuleConfig::timestamp("date", "%Y%m%d");
        let rule = SortRule::from_config(0, &config, &extractor).unwrap();

        let (sorted, errors) = rule.sort(
            &extractor,
            &paths(&["app-20231231.log", "app-20240115.log", "app-20240102.log"]),
        );
        assert!(errors.is_empty());
        assert_eq!(
            names(&sorted),
            ["app-20240115.log", "app-20240102.log", "app-20231231.log"]
        );
    }

    #[test]
    fn test_timestamp_unparsable_is_earliest() {
        let extractor = KeyExtractor::new(r"^app-(?P<date>\d{8})\.log$").unwrap();
        let config = SortRuleConfig::timestamp("date", "%Y%m%d");
        let rule = SortRule::from_config(1, &config, &extractor).unwrap();

        let (sorted, errors) = rule.sort(
            &extractor,
            &paths(&["app-20241340.log", "app-20240101.log"]),
        );
        assert_eq!(names(&sorted), ["app-20240101.log", "app-20241340.log"]);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            RuleError::KeyParse { index: 1, sort_type: SortType::Timestamp, .. }
        ));
    }

    #[test]
    fn test_timestamp_location_shifts_instant() {
        let extractor = KeyExtractor::new(r"^(?P<ts>\d{12})$").unwrap();
        let config = SortRuleConfig::timestamp("ts", "%Y%m%d%H%M").with_location("Asia/Tokyo");
        let rule = SortRule::from_config(0, &config, &extractor).unwrap();

        let (key, error) = rule.key(&extractor, Path::new("202401010900"));
        assert!(error.is_none());
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(key, SortKey::Timestamp(Some(expected)));
    }

    #[test]
    fn test_timestamp_with_offset_in_layout() {
        let extractor = KeyExtractor::new(r"^(?P<ts>.+)\.log$").unwrap();
        let config = SortRuleConfig::timestamp("ts", "%Y-%m-%dT%H%M%z").with_location("Asia/Tokyo");
        let rule = SortRule::from_config(0, &config, &extractor).unwrap();

        let (key, error) = rule.key(&extractor, Path::new("2024-01-01T0100+0100.log"));
        assert!(error.is_none());
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(key, SortKey::Timestamp(Some(expected)));
    }

    #[test]
    fn test_timestamp_hourly_layout_keeps_hour() {
        let extractor = KeyExtractor::new(r"^app-(?P<ts>\d{10})\.log$").unwrap();
        let config = SortRuleConfig::timestamp("ts", "%Y%m%d%H");
        let rule = SortRule::from_config(0, &config, &extractor).unwrap();

        let (sorted, errors) = rule.sort(
            &extractor,
            &paths(&["app-2024010109.log", "app-2024010123.log"]),
        );
        assert!(errors.is_empty());
        assert_eq!(names(&sorted), ["app-2024010123.log", "app-2024010109.log"]);

        let (key, _) = rule.key(&extractor, Path::new("app-2024010109.log"));
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        assert_eq!(key, SortKey::Timestamp(Some(expected)));
    }

    #[test]
    fn test_timestamp_monthly_layout_defaults_day() {
        let extractor = KeyExtractor::new(r"^app-(?P<ts>\d{6})\.log$").unwrap();
        let config = SortRuleConfig::timestamp("ts", "%Y%m");
        let rule = SortRule::from_config(0, &config, &extractor).unwrap();

        let (sorted, errors) = rule.sort(
            &extractor,
            &paths(&["app-202401.log", "app-202405.log"]),
        );
        assert!(errors.is_empty());
        assert_eq!(names(&sorted), ["app-202405.log", "app-202401.log"]);

        let (key, _) = rule.key(&extractor, Path::new("app-202405.log"));
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(key, SortKey::Timestamp(Some(expected)));
    }

    #[test]
    fn test_timestamp_in_dst_gap_is_earliest() {
        let extractor = KeyExtractor::new(r"^(?P<ts>\d{12})$").unwrap();
        let config =
            SortRuleConfig::timestamp("ts", "%Y%m%d%H%M").with_location("Europe/Berlin");
        let rule = SortRule::from_config(3, &config, &extractor).unwrap();

        // Berlin clocks jump from 02:00 to 03:00 on 2024-03-31
        let (key, error) = rule.key(&extractor, Path::new("202403310230"));
        assert_eq!(key, SortKey::Timestamp(None));
        assert!(matches!(
            error,
            Some(RuleError::KeyParse { index: 3, sort_type: SortType::Timestamp, ref key, .. })
                if key == "202403310230"
        ));

        let (sorted, errors) = rule.sort(&extractor, &paths(&["202403310230", "202403310330"]));
        assert_eq!(names(&sorted), ["202403310330", "202403310230"]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_factory_rejects_unknown_group() {
        let extractor = KeyExtractor::new(r"(?P<n>\d+)").unwrap();
        let result = SortRule::from_config(2, &SortRuleConfig::numeric("m"), &extractor);
        assert_eq!(
            result.unwrap_err(),
            RuleError::UnknownGroup {
                index: 2,
                sort_type: SortType::Numeric,
                group: "m".to_string(),
            }
        );
    }

    #[test]
    fn test_factory_rejects_bad_layouts() {
        let extractor = KeyExtractor::new(r"(?P<d>\d+)").unwrap();

        let mut missing = SortRuleConfig::timestamp("d", "");
        assert_eq!(
            SortRule::from_config(0, &missing, &extractor).unwrap_err(),
            RuleError::MissingLayout { index: 0 }
        );
        missing.layout = None;
        assert_eq!(
            SortRule::from_config(0, &missing, &extractor).unwrap_err(),
            RuleError::MissingLayout { index: 0 }
        );

        for layout in ["%Q", "YYYY-MM-DD"] {
            let config = SortRuleConfig::timestamp("d", layout);
            assert!(matches!(
                SortRule::from_config(0, &config, &extractor),
                Err(RuleError::InvalidLayout { .. })
            ));
        }
    }

    #[test]
    fn test_factory_rejects_unknown_location() {
        let extractor = KeyExtractor::new(r"(?P<d>\d+)").unwrap();
        let config = SortRuleConfig::timestamp("d", "%Y%m%d").with_location("Mars/Olympus");
        assert_eq!(
            SortRule::from_config(0, &config, &extractor).unwrap_err(),
            RuleError::UnknownLocation {
                index: 0,
                location: "Mars/Olympus".to_string(),
            }
        );
    }

    #[test]
    fn test_factory_defaults_to_utc() {
        let extractor = KeyExtractor::new(r"(?P<d>\d+)").unwrap();
        let rule =
            SortRule::from_config(0, &SortRuleConfig::timestamp("d", "%Y%m%d"), &extractor).unwrap();
        assert_eq!(
            rule.kind(),
            &RuleKind::Timestamp {
                layout: "%Y%m%d".to_string(),
                location: Tz::UTC,
            }
        );
    }
}
