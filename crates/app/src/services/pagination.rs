//! Pagination walker — collects every element of a link-paginated listing.

use glowbridge_domain::error::GlowBridgeError;
use glowbridge_domain::id::BearerToken;
use serde::de::DeserializeOwned;

use crate::ports::CloudApi;

/// Fetch `start` and every page it links to, concatenating elements in page
/// order.
///
/// One failed page fails the whole walk; nothing is retried and no partial
/// result is returned.
///
/// # Errors
///
/// Propagates the first downstream error, returns
/// [`GlowBridgeError::Downstream`] when an element does not decode as `T`, and
/// [`GlowBridgeError::PaginationLimit`] when more than `max_pages` pages are
/// announced.
pub async fn fetch_all<C, T>(
    cloud: &C,
    token: &BearerToken,
    start: &str,
    max_pages: usize,
) -> Result<Vec<T>, GlowBridgeError>
where
    C: CloudApi,
    T: DeserializeOwned,
{
    let mut items = Vec::new();
    let mut next = Some(start.to_string());
    let mut fetched = 0;

    while let Some(location) = next.take() {
        if fetched == max_pages {
            return Err(GlowBridgeError::PaginationLimit { limit: max_pages });
        }
        let page = cloud.get_page(token, &location).await?;
        fetched += 1;
        tracing::debug!(%location, page = fetched, len = page.items.len(), "fetched page");

        for item in page.items {
            items.push(serde_json::from_value(item).map_err(GlowBridgeError::downstream)?);
        }
        next = page.next;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCloud, token};
    use glowbridge_domain::cloud::CloudSpace;
    use serde_json::json;

    fn space(id: &str) -> serde_json::Value {
        json!({"id": id, "name": format!("space {id}")})
    }

    fn ids(spaces: &[CloudSpace]) -> Vec<&str> {
        spaces.iter().map(|s| s.id.as_str()).collect()
    }

    #[tokio::test]
    async fn should_return_single_page_when_no_next_link() {
        let cloud = FakeCloud::default().with_page("/spaces", vec![space("a"), space("b")], None);

        let spaces: Vec<CloudSpace> = fetch_all(&cloud, &token(), "/spaces", 10).await.unwrap();
        assert_eq!(ids(&spaces), ["a", "b"]);
    }

    #[tokio::test]
    async fn should_concatenate_pages_in_order() {
        let cloud = FakeCloud::default()
            .with_page("/spaces", vec![space("a"), space("b")], Some("/spaces?page=2"))
            .with_page("/spaces?page=2", vec![space("c")], Some("/spaces?page=3"))
            .with_page("/spaces?page=3", vec![space("d")], None);

        let spaces: Vec<CloudSpace> = fetch_all(&cloud, &token(), "/spaces", 10).await.unwrap();
        assert_eq!(ids(&spaces), ["a", "b", "c", "d"]);
        assert_eq!(
            cloud.calls(),
            ["GET /spaces", "GET /spaces?page=2", "GET /spaces?page=3"]
        );
    }

    #[tokio::test]
    async fn should_fail_whole_walk_when_a_page_fails() {
        let cloud = FakeCloud::default().with_page(
            "/spaces",
            vec![space("a")],
            Some("/spaces?page=2"),
        );

        let result: Result<Vec<CloudSpace>, _> = fetch_all(&cloud, &token(), "/spaces", 10).await;
        assert!(matches!(result, Err(GlowBridgeError::Downstream(_))));
    }

    #[tokio::test]
    async fn should_stop_at_page_limit() {
        let cloud = FakeCloud::default()
            .with_page("/spaces", vec![space("a")], Some("/spaces?page=2"))
            .with_page("/spaces?page=2", vec![space("b")], Some("/spaces"));

        let result: Result<Vec<CloudSpace>, _> = fetch_all(&cloud, &token(), "/spaces", 5).await;
        assert!(matches!(
            result,
            Err(GlowBridgeError::PaginationLimit { limit: 5 })
        ));
        assert_eq!(cloud.calls().len(), 5);
    }

    #[tokio::test]
    async fn should_fail_when_element_does_not_decode() {
        let cloud = FakeCloud::default().with_page("/spaces", vec![json!({"name": "no id"})], None);

        let result: Result<Vec<CloudSpace>, _> = fetch_all(&cloud, &token(), "/spaces", 10).await;
        assert!(matches!(result, Err(GlowBridgeError::Downstream(_))));
    }

    #[tokio::test]
    async fn should_return_empty_list_for_empty_page() {
        let cloud = FakeCloud::default().with_page("/spaces", vec![], None);

        let spaces: Vec<CloudSpace> = fetch_all(&cloud, &token(), "/spaces", 10).await.unwrap();
        assert!(spaces.is_empty());
    }
}
