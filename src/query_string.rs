use std::collections::HashMap;

use crate::listing::CategoryFilter;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Requested page, 1 when absent or not a positive number.
    pub fn get_page(&self) -> u32 {
        match self.get("page").and_then(|val| val.trim().parse::<u32>().ok()) {
            Some(0) | None => 1,
            Some(val) => val,
        }
    }

    pub fn get_category(&self) -> CategoryFilter {
        CategoryFilter::from_param(self.get("category"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_page() {
        assert_eq!(QueryString::from("page=3").get_page(), 3);
        assert_eq!(QueryString::from("page=0").get_page(), 1);
        assert_eq!(QueryString::from("page=-2").get_page(), 1);
        assert_eq!(QueryString::from("page=abc").get_page(), 1);
        assert_eq!(QueryString::from("other=2").get_page(), 1);
    }

    #[test]
    fn test_get_category() {
        let qs = QueryString::from("category=Web%20Development&page=2");
        assert_eq!(qs.get_category(), CategoryFilter::Only("Web Development".to_string()));
        assert_eq!(qs.get_page(), 2);

        assert_eq!(QueryString::from("category=all").get_category(), CategoryFilter::All);
        assert_eq!(QueryString::from("").get_category(), CategoryFilter::All);
    }

    #[test]
    fn test_parse_query_str() {
        let buf = "category=UI%2FUX&page=2&sort=new";
        let expected = vec![
            ("category".to_owned(), "UI/UX".to_owned()),
            ("page".to_owned(), "2".to_owned()),
            ("sort".to_owned(), "new".to_owned()),
        ].into_iter().collect::<HashMap<_, _>>();

        assert_eq!(QueryString::from(buf), QueryString { items: expected });
    }

    #[test]
    fn test_parse_empty_query_str() {
        let expected = QueryString {
            items: Default::default(),
        };
        assert_eq!(QueryString::from(""), expected);
    }

    #[test]
    fn test_parse_key_only_query_str() {
        let qs = QueryString::from("key-only");
        assert_eq!(qs.get("key-only"), Some(""));
    }
}
