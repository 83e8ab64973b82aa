//! Rows returned by the ads query and the sampling applied to them.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

/// One ad row with its linked image descriptions.
#[derive(Debug, Clone, Deserialize)]
pub struct AdRecord {
    #[serde(default)]
    pub meta_ad_id: Option<serde_json::Value>,
    #[serde(default)]
    pub eu_total_reach: Option<i64>,
    #[serde(default)]
    pub facebook_ad_image_links: Option<Vec<ImageLink>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageLink {
    #[serde(default)]
    pub ad_images: Option<AdImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdImage {
    #[serde(default)]
    pub detailed_description: Option<String>,
}

impl AdRecord {
    /// Non-empty image descriptions of this ad, in link order.
    pub fn descriptions(&self) -> impl Iterator<Item = &str> {
        self.facebook_ad_image_links
            .iter()
            .flatten()
            .filter_map(|link| link.ad_images.as_ref()?.detailed_description.as_deref())
            .filter(|description| !description.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyRecord {
    pub name: Option<String>,
}

/// Pick up to `sample_size` records at random and flatten their
/// descriptions.
pub fn sample_descriptions<R: Rng + ?Sized>(
    records: &[AdRecord],
    sample_size: usize,
    rng: &mut R,
) -> Vec<String> {
    records
        .choose_multiple(rng, sample_size.min(records.len()))
        .flat_map(AdRecord::descriptions)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    fn record(descriptions: &[Option<&str>]) -> AdRecord {
        serde_json::from_value(json!({
            "meta_ad_id": "1",
            "eu_total_reach": 1000,
            "facebook_ad_image_links": descriptions
                .iter()
                .map(|d| json!({"ad_images": {"detailed_description": d}}))
                .collect::<Vec<_>>()
        }))
        .unwrap()
    }

    #[test]
    fn test_descriptions_skip_missing_and_blank() {
        let record = record(&[Some("Red sneakers on a beach"), None, Some("  ")]);
        assert_eq!(record.descriptions().collect::<Vec<_>>(), vec!["Red sneakers on a beach"]);
    }

    #[test]
    fn test_null_links_parse() {
        let record: AdRecord =
            serde_json::from_value(json!({"meta_ad_id": 7, "facebook_ad_image_links": null}))
                .unwrap();
        assert_eq!(record.descriptions().count(), 0);
    }

    #[test]
    fn test_sample_takes_everything_when_small() {
        let records = vec![record(&[Some("a")]), record(&[Some("b"), Some("c")])];
        let mut rng = StdRng::seed_from_u64(7);
        let mut sampled = sample_descriptions(&records, 20, &mut rng);
        sampled.sort();
        assert_eq!(sampled, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sample_of_nothing_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_descriptions(&[], 20, &mut rng).is_empty());
    }

    #[test]
    fn test_sample_is_deterministic_for_a_seed() {
        let records: Vec<AdRecord> =
            (0..50).map(|i| record(&[Some(&format!("ad {i}"))])).collect();
        let first = sample_descriptions(&records, 20, &mut StdRng::seed_from_u64(42));
        let second = sample_descriptions(&records, 20, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
        assert_eq!(first.len(), 20);
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_sample_uses_at_most_sample_size_records(
                count in 0usize..120,
                sample_size in 0usize..40,
                seed in any::<u64>(),
            ) {
                let records: Vec<AdRecord> =
                    (0..count).map(|i| record(&[Some(&format!("ad {i}"))])).collect();
                let sampled = sample_descriptions(&records, sample_size, &mut StdRng::seed_from_u64(seed));
                prop_assert_eq!(sampled.len(), sample_size.min(count));

                let mut unique = sampled.clone();
                unique.sort();
                unique.dedup();
                prop_assert_eq!(unique.len(), sampled.len());
            }
        }
    }
}
