use crate::{domain::OrganicResult, error::SerpError};

pub fn locate<'a>(
    results: &'a [OrganicResult],
    domain: &str,
) -> Result<Option<&'a OrganicResult>, SerpError> {
    // An empty domain would match every link
    let domain = target_domain(domain)?;

    Ok(results.iter().find(|result| result.link.contains(domain)))
}

pub fn target_domain(domain: &str) -> Result<&str, SerpError> {
    let domain = domain.trim();
    match domain.is_empty() {
        true => Err(SerpError::invalid_input("Please enter a domain to track.")),
        false => Ok(domain),
    }
}

#[cfg(test)]
mod tests {
    use super::locate;
    use crate::{domain::OrganicResult, error::SerpError};

    fn results(links: &[&str]) -> Vec<OrganicResult> {
        links
            .iter()
            .enumerate()
            .map(|(i, link)| OrganicResult {
                position: i as u32 + 1,
                link: link.to_string(),
                title: format!("Result {}", i + 1),
                snippet: String::new(),
                date: None,
            })
            .collect()
    }

    #[test]
    fn finds_first_matching_link() {
        let results = results(&[
            "https://competitor.com/seo",
            "https://blog.example.com/post",
            "https://example.com/",
        ]);

        let found = locate(&results, "example.com").unwrap().unwrap();
        assert_eq!(found.position, 2);
        assert_eq!(found.link, "https://blog.example.com/post");
    }

    #[test]
    fn duplicates_resolve_to_earliest() {
        let results = results(&[
            "https://a.com",
            "https://target.io/one",
            "https://target.io/two",
        ]);

        let found = locate(&results, "target.io").unwrap().unwrap();
        assert_eq!(found.position, 2);
    }

    #[test]
    fn missing_domain_is_not_found() {
        let results = results(&["https://a.com", "https://b.com"]);
        assert_eq!(locate(&results, "c.com").unwrap(), None);
        assert_eq!(locate(&[], "c.com").unwrap(), None);
    }

    #[test]
    fn empty_domain_is_invalid_input() {
        let results = results(&["https://a.com"]);
        assert!(matches!(locate(&results, ""), Err(SerpError::InvalidInput(_))));
        assert!(matches!(locate(&results, "  "), Err(SerpError::InvalidInput(_))));
    }
}
