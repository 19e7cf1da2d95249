//! Stamp search: query building, result grouping and summary text

use crate::highlight::contains_ignore_case;
use crate::types::{MatchType, StampResult};

pub const SEARCH_PATH: &str = "/stamplar/sok/";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    #[default]
    Partial,
}

impl MatchMode {
    /// Unknown values fall back to `Partial`
    pub fn parse(value: &str) -> Self {
        match value {
            "exact" => MatchMode::Exact,
            _ => MatchMode::Partial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Exact => "exact",
            MatchMode::Partial => "partial",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CombineMode {
    #[default]
    And,
    Or,
}

impl CombineMode {
    /// Unknown values fall back to `And`
    pub fn parse(value: &str) -> Self {
        match value {
            "or" => CombineMode::Or,
            _ => CombineMode::And,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CombineMode::And => "and",
            CombineMode::Or => "or",
        }
    }
}

/// Current state of the search controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub manufacturer: String,
    pub stamp_type: String,
    pub match_mode: MatchMode,
    pub combine_mode: CombineMode,
    pub symbol_ids: Vec<String>,
}

impl SearchQuery {
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// No text, filters or symbols. Such a query is never sent.
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
            && self.manufacturer.trim().is_empty()
            && self.stamp_type.trim().is_empty()
            && self.symbol_ids.is_empty()
    }

    /// Query string pairs; `symbols` repeats once per selected id
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.text().to_string()),
            ("manufacturer", self.manufacturer.trim().to_string()),
            ("stamp_type", self.stamp_type.trim().to_string()),
            ("search_type", self.match_mode.as_str().to_string()),
            ("search_logic", self.combine_mode.as_str().to_string()),
        ];
        pairs.extend(self.symbol_ids.iter().map(|id| ("symbols", id.clone())));
        pairs
    }

    /// One-line description of a result set
    pub fn summary(&self, count: usize) -> String {
        let noun = if count == 1 { "stämpel" } else { "stämplar" };
        let mut text = format!("Hittade {} {}", count, noun);

        let mut criteria = Vec::new();
        if !self.text().is_empty() {
            criteria.push(format!("text: \"{}\"", self.text()));
        }
        if !self.symbol_ids.is_empty() {
            criteria.push(format!("{} symboler", self.symbol_ids.len()));
        }
        if self.match_mode != MatchMode::Partial {
            criteria.push(format!("söktyp: {}", self.match_mode.as_str()));
        }
        if self.combine_mode != CombineMode::And {
            criteria.push(format!("logik: {}", self.combine_mode.as_str()));
        }
        if !criteria.is_empty() {
            text.push_str(&format!(" ({})", criteria.join(", ")));
        }
        text
    }
}

/// Result group, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Name,
    Description,
    Transcription,
    Symbol,
    Manufacturer,
    Other,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::Name,
        Bucket::Description,
        Bucket::Transcription,
        Bucket::Symbol,
        Bucket::Manufacturer,
        Bucket::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Name => "Namn-matchning",
            Bucket::Description => "Beskrivning-matchning",
            Bucket::Transcription => "Transkription-matchning",
            Bucket::Symbol => "Symbol-matchning",
            Bucket::Manufacturer => "Tillverkare-matchning",
            Bucket::Other => "Andra resultat",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Bucket::Name => "fas fa-tag",
            Bucket::Description => "fas fa-align-left",
            Bucket::Transcription => "fas fa-font",
            Bucket::Symbol => "fas fa-icons",
            Bucket::Manufacturer => "fas fa-industry",
            Bucket::Other => "fas fa-list",
        }
    }
}

impl From<MatchType> for Bucket {
    fn from(m: MatchType) -> Self {
        match m {
            MatchType::Name => Bucket::Name,
            MatchType::Description => Bucket::Description,
            MatchType::Transcription => Bucket::Transcription,
            MatchType::Symbol => Bucket::Symbol,
            MatchType::Manufacturer => Bucket::Manufacturer,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultGroup<'a> {
    pub bucket: Bucket,
    pub items: Vec<&'a StampResult>,
}

/// Match types recomputed locally when the server sent none
pub fn local_match_types(stamp: &StampResult, query: &SearchQuery) -> Vec<MatchType> {
    let text = query.text();
    let has_text = !text.is_empty();
    let optional = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| contains_ignore_case(value, text))
    };

    let mut out = Vec::new();
    if has_text && contains_ignore_case(&stamp.name, text) {
        out.push(MatchType::Name);
    }
    if has_text && optional(&stamp.description) {
        out.push(MatchType::Description);
    }
    if has_text && optional(&stamp.transcription) {
        out.push(MatchType::Transcription);
    }
    let symbol_text = has_text && stamp.symbols.iter().any(|s| contains_ignore_case(s, text));
    // Without ids on the result, any stamp carrying symbols counts for a
    // symbol filter; with ids, they have to intersect the selection.
    let symbol_selected = !query.symbol_ids.is_empty()
        && !stamp.symbols.is_empty()
        && (stamp.symbol_ids.is_empty()
            || stamp
                .symbol_ids
                .iter()
                .any(|id| query.symbol_ids.iter().any(|sel| sel.trim() == id.to_string())));
    if symbol_text || symbol_selected {
        out.push(MatchType::Symbol);
    }
    if has_text && contains_ignore_case(&stamp.manufacturer, text) {
        out.push(MatchType::Manufacturer);
    }
    out
}

/// Partition results into buckets. A stamp appears once in every bucket it
/// matched, and only in `Other` when it matched nothing. Empty buckets are
/// left out.
pub fn group_results<'a>(results: &'a [StampResult], query: &SearchQuery) -> Vec<ResultGroup<'a>> {
    let mut groups: Vec<ResultGroup<'a>> = Bucket::ALL
        .iter()
        .map(|&bucket| ResultGroup { bucket, items: Vec::new() })
        .collect();

    for stamp in results {
        let matches = if stamp.has_server_match_types() {
            stamp.match_types()
        } else {
            local_match_types(stamp, query)
        };

        if matches.is_empty() {
            groups[5].items.push(stamp);
            continue;
        }
        for m in matches {
            let bucket = Bucket::from(m);
            if let Some(group) = groups.iter_mut().find(|g| g.bucket == bucket) {
                group.items.push(stamp);
            }
        }
    }

    groups.retain(|g| !g.items.is_empty());
    groups
}

/// Bootstrap badge colour for a stamp status
pub fn status_badge_class(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "känd" => "success",
        "okänd" => "warning",
        "osäker" => "danger",
        _ => "secondary",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(id: u32, name: &str) -> StampResult {
        StampResult {
            id,
            name: name.to_string(),
            manufacturer: "Gränsfors Bruk".to_string(),
            stamp_type: "Text".to_string(),
            status: "Känd".to_string(),
            ..Default::default()
        }
    }

    fn query(text: &str) -> SearchQuery {
        SearchQuery {
            text: text.to_string(),
            ..Default::default()
        }
    }

    // =============================================
    // SearchQuery
    // =============================================

    #[test]
    fn test_empty_query() {
        assert!(SearchQuery::default().is_empty());
        assert!(query("   ").is_empty());

        let q = SearchQuery {
            match_mode: MatchMode::Exact,
            combine_mode: CombineMode::Or,
            ..Default::default()
        };
        assert!(q.is_empty());
    }

    #[test]
    fn test_filter_only_query_is_not_empty() {
        let q = SearchQuery {
            manufacturer: "12".to_string(),
            ..Default::default()
        };
        assert!(!q.is_empty());

        let q = SearchQuery {
            symbol_ids: vec!["4".to_string()],
            ..Default::default()
        };
        assert!(!q.is_empty());
    }

    #[test]
    fn test_query_pairs_repeat_symbols() {
        let q = SearchQuery {
            text: " hults ".to_string(),
            symbol_ids: vec!["3".to_string(), "5".to_string()],
            ..Default::default()
        };
        let pairs = q.to_query_pairs();
        assert_eq!(pairs[0], ("q", "hults".to_string()));
        assert_eq!(pairs[3], ("search_type", "partial".to_string()));
        assert_eq!(pairs[4], ("search_logic", "and".to_string()));
        let symbols: Vec<_> = pairs.iter().filter(|(k, _)| *k == "symbols").collect();
        assert_eq!(symbols.len(), 2);
    }

    #[test]
    fn test_modes_parse_with_fallback() {
        assert_eq!(MatchMode::parse("exact"), MatchMode::Exact);
        assert_eq!(MatchMode::parse("fuzzy"), MatchMode::Partial);
        assert_eq!(CombineMode::parse("or"), CombineMode::Or);
        assert_eq!(CombineMode::parse(""), CombineMode::And);
    }

    #[test]
    fn test_summary_singular_and_criteria() {
        assert_eq!(query("").summary(1), "Hittade 1 stämpel");

        let q = SearchQuery {
            text: "egg".to_string(),
            symbol_ids: vec!["1".to_string(), "2".to_string()],
            match_mode: MatchMode::Exact,
            combine_mode: CombineMode::Or,
            ..Default::default()
        };
        assert_eq!(
            q.summary(3),
            "Hittade 3 stämplar (text: \"egg\", 2 symboler, söktyp: exact, logik: or)"
        );
    }

    // =============================================
    // Grouping
    // =============================================

    #[test]
    fn test_group_uses_server_match_types() {
        let mut s = stamp(1, "Hults Bruk");
        s.match_types = vec!["manufacturer".to_string(), "name".to_string()];
        let results = vec![s];
        let groups = group_results(&results, &query("zzz"));

        let buckets: Vec<Bucket> = groups.iter().map(|g| g.bucket).collect();
        assert_eq!(buckets, vec![Bucket::Name, Bucket::Manufacturer]);
    }

    #[test]
    fn test_group_unknown_server_tags_go_to_other() {
        let mut s = stamp(1, "Hults Bruk");
        s.match_types = vec!["fuzzy".to_string()];
        let results = vec![s];
        let groups = group_results(&results, &query("hults"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].bucket, Bucket::Other);
    }

    #[test]
    fn test_group_local_fallback() {
        let mut a = stamp(1, "Eggen");
        a.manufacturer = "Wetterlings".to_string();
        let mut b = stamp(2, "Krona");
        b.manufacturer = "Wetterlings".to_string();
        b.transcription = Some("EGG & CO".to_string());
        let mut c = stamp(3, "Krona");
        c.manufacturer = "Wetterlings".to_string();
        let results = vec![a, b, c];

        let groups = group_results(&results, &query("EGG"));
        let find = |bucket| groups.iter().find(|g| g.bucket == bucket).map(|g| g.items.iter().map(|s| s.id).collect::<Vec<_>>());

        assert_eq!(find(Bucket::Name), Some(vec![1]));
        assert_eq!(find(Bucket::Transcription), Some(vec![2]));
        assert_eq!(find(Bucket::Other), Some(vec![3]));
        assert_eq!(find(Bucket::Manufacturer), None);
    }

    #[test]
    fn test_group_symbol_by_selected_id() {
        let mut s = stamp(1, "Krona");
        s.symbols = vec!["Krona".to_string()];
        s.symbol_ids = vec![4];
        let results = vec![s];
        let q = SearchQuery {
            symbol_ids: vec!["4".to_string()],
            ..Default::default()
        };
        let groups = group_results(&results, &q);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].bucket, Bucket::Symbol);
    }

    #[test]
    fn test_group_symbol_filter_without_ids() {
        let json = r#"{"id": 1, "name": "Krona", "manufacturer": "Hults Bruk",
            "type": "Symbol", "status": "Känd", "symbols": ["Krona", "Stjärna"]}"#;
        let results: Vec<StampResult> = vec![serde_json::from_str(json).expect("deserialize failed")];
        let q = SearchQuery {
            symbol_ids: vec!["4".to_string()],
            ..Default::default()
        };
        let groups = group_results(&results, &q);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].bucket, Bucket::Symbol);
    }

    #[test]
    fn test_group_symbol_ids_must_intersect() {
        let mut s = stamp(1, "Krona");
        s.symbols = vec!["Krona".to_string()];
        s.symbol_ids = vec![9];
        let results = vec![s];
        let q = SearchQuery {
            symbol_ids: vec!["4".to_string()],
            ..Default::default()
        };
        let groups = group_results(&results, &q);
        assert_eq!(groups[0].bucket, Bucket::Other);
    }

    #[test]
    fn test_group_every_result_lands_somewhere() {
        let mut results: Vec<StampResult> = (0..6).map(|i| stamp(i, &format!("S{}", i))).collect();
        results[2].description = Some("s2 beskrivning".to_string());
        results[4].match_types = vec!["symbol".to_string()];
        let groups = group_results(&results, &query("s2"));

        for r in &results {
            assert!(groups.iter().any(|g| g.items.iter().any(|s| s.id == r.id)));
        }
        let other = groups.iter().find(|g| g.bucket == Bucket::Other).unwrap();
        for s in &other.items {
            assert!(!groups.iter().any(|g| g.bucket != Bucket::Other && g.items.iter().any(|x| x.id == s.id)));
        }
    }

    #[test]
    fn test_status_badge_class() {
        assert_eq!(status_badge_class("Känd"), "success");
        assert_eq!(status_badge_class("OKÄND"), "warning");
        assert_eq!(status_badge_class("Osäker"), "danger");
        assert_eq!(status_badge_class("Raderad"), "secondary");
    }
}
