//! URL construction helpers for the PostgREST table endpoint.
//!
//! This module provides pure functions for building request URLs, ensuring
//! consistent filter syntax across all calls.

use crate::config::StoreConfigError;
use inovasi_core::RecordKey;
use url::Url;

/// Identity column of the records table.
pub const KEY_COLUMN: &str = "no";

/// Build the table endpoint `{base_url}/rest/v1/{table}`.
pub fn build_table_url(base_url: &str, table: &str) -> Result<Url, StoreConfigError> {
    let table = table.trim();
    if table.is_empty() {
        return Err(StoreConfigError::EmptyTable);
    }

    let mut url = Url::parse(base_url.trim()).map_err(|source| StoreConfigError::InvalidUrl {
        url: base_url.to_string(),
        source,
    })?;

    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/rest/v1/{table}"));
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// Full fetch ordered by key ascending.
pub fn build_fetch_all_url(table_url: &Url) -> Url {
    let mut url = table_url.clone();
    url.set_query(Some(&format!("select=*&order={KEY_COLUMN}.asc")));
    url
}

/// Insert endpoint.
pub fn build_insert_url(table_url: &Url) -> Url {
    let mut url = table_url.clone();
    url.set_query(Some("select=*"));
    url
}

/// Row filter `no=eq.{key}`.
pub fn build_key_eq_url(table_url: &Url, key: RecordKey) -> Url {
    let mut url = table_url.clone();
    url.set_query(Some(&format!("{KEY_COLUMN}=eq.{key}")));
    url
}

/// Row filter `no=in.(k1,k2,...)`.
pub fn build_keys_in_url(table_url: &Url, keys: &[RecordKey]) -> Url {
    let list = keys
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let mut url = table_url.clone();
    url.set_query(Some(&format!("{KEY_COLUMN}=in.({list})")));
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Url {
        build_table_url("https://project.supabase.co", "inovasi_daerah").unwrap()
    }

    #[test]
    fn test_build_table_url() {
        assert_eq!(
            table().as_str(),
            "https://project.supabase.co/rest/v1/inovasi_daerah"
        );
    }

    #[test]
    fn test_build_table_url_with_trailing_slash_and_path() {
        let url = build_table_url("http://localhost:54321/proxy/", "inovasi_daerah").unwrap();
        assert_eq!(url.as_str(), "http://localhost:54321/proxy/rest/v1/inovasi_daerah");
    }

    #[test]
    fn test_build_table_url_rejects_bad_input() {
        assert!(matches!(
            build_table_url("not a url", "inovasi_daerah"),
            Err(StoreConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            build_table_url("https://project.supabase.co", "  "),
            Err(StoreConfigError::EmptyTable)
        ));
    }

    #[test]
    fn test_fetch_all_url_orders_by_key() {
        let url = build_fetch_all_url(&table());
        assert_eq!(url.query(), Some("select=*&order=no.asc"));
    }

    #[test]
    fn test_key_filters() {
        assert_eq!(build_key_eq_url(&table(), 7).query(), Some("no=eq.7"));
        assert_eq!(
            build_keys_in_url(&table(), &[1, 3, 5]).query(),
            Some("no=in.(1,3,5)")
        );
    }
}
