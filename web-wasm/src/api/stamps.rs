//! Stamp search endpoint

use axe_catalog_common::search::SEARCH_PATH;
use axe_catalog_common::{Result, SearchQuery, SearchResponse, StampResult};
use web_sys::UrlSearchParams;

use super::client::{get_json, js_error};

pub fn search_url(query: &SearchQuery) -> Result<String> {
    let params = UrlSearchParams::new().map_err(js_error)?;
    for (name, value) in query.to_query_pairs() {
        params.append(name, &value);
    }
    Ok(format!("{}?{}", SEARCH_PATH, String::from(params.to_string())))
}

pub async fn search_stamps(query: &SearchQuery) -> Result<Vec<StampResult>> {
    let url = search_url(query)?;
    let response: SearchResponse = get_json(&url).await?;
    Ok(response.results)
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_search_url_encodes_and_repeats_symbols() {
        let query = SearchQuery {
            text: "Gränsfors & co".to_string(),
            symbol_ids: vec!["3".to_string(), "9".to_string()],
            ..SearchQuery::default()
        };
        let url = search_url(&query).unwrap();
        assert!(url.starts_with("/stamplar/sok/?q=Gr%C3%A4nsfors+%26+co"));
        assert!(url.contains("symbols=3&symbols=9"));
    }
}
