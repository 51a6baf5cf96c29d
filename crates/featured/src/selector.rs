//! Picks one deliverable product per featured search term.

use futures::future::join_all;
use rand::seq::SliceRandom;
use rand::Rng;
use storefront_catalog::CatalogApi;
use storefront_core::{FeaturedSet, Product};

/// Search every term concurrently. A failed search yields an empty list for
/// its term; results stay in term order.
pub async fn search_terms<A>(api: &A, terms: &[String]) -> Vec<Vec<Product>>
where
    A: CatalogApi + ?Sized,
{
    let searches = terms.iter().map(|term| async move {
        match api.search(term).await {
            Ok(products) => products,
            Err(err) => {
                tracing::warn!("featured search for {:?} failed: {}", term, err);
                Vec::new()
            }
        }
    });

    join_all(searches).await
}

/// One uniformly random product with delivery info from each result list.
/// Lists without an eligible candidate contribute nothing.
pub fn pick_featured<R>(results: Vec<Vec<Product>>, rng: &mut R) -> FeaturedSet
where
    R: Rng + ?Sized,
{
    results
        .into_iter()
        .filter_map(|products| {
            let eligible: Vec<Product> = products
                .into_iter()
                .filter(Product::has_delivery_info)
                .collect();
            eligible.choose(rng).cloned()
        })
        .collect::<Vec<_>>()
        .into()
}

pub async fn select_featured<A, R>(api: &A, terms: &[String], rng: &mut R) -> FeaturedSet
where
    A: CatalogApi + ?Sized,
    R: Rng + ?Sized,
{
    let results = search_terms(api, terms).await;
    let featured = pick_featured(results, rng);
    tracing::info!(
        "selected {} featured products from {} terms",
        featured.len(),
        terms.len()
    );
    featured
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use storefront_core::DeliveryDays;

    fn product(id: &str, min: DeliveryDays, max: DeliveryDays) -> Product {
        Product {
            id: id.into(),
            min_delivery_days: min,
            max_delivery_days: max,
            ..Product::default()
        }
    }

    #[test]
    fn skips_terms_without_deliverable_products() {
        let results = vec![
            vec![product("a1", DeliveryDays::Unknown, DeliveryDays::Unknown)],
            vec![
                product("b1", DeliveryDays::Days(2), DeliveryDays::Unknown),
                product("b2", DeliveryDays::Unknown, DeliveryDays::Unknown),
            ],
            Vec::new(),
            vec![product("d1", DeliveryDays::Unknown, DeliveryDays::Days(9))],
        ];

        let featured = pick_featured(results, &mut StdRng::seed_from_u64(7));
        let ids: Vec<_> = featured.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b1", "d1"]);
    }

    proptest! {
        #[test]
        fn pick_is_one_of_the_eligible_candidates(
            known in proptest::collection::vec(any::<bool>(), 1..8),
            seed in any::<u64>(),
        ) {
            let products: Vec<Product> = known
                .iter()
                .enumerate()
                .map(|(i, &k)| {
                    let days = if k { DeliveryDays::Days(1) } else { DeliveryDays::Unknown };
                    product(&i.to_string(), days, DeliveryDays::Unknown)
                })
                .collect();

            let featured = pick_featured(vec![products], &mut StdRng::seed_from_u64(seed));
            let any_known = known.iter().any(|&k| k);
            prop_assert_eq!(featured.len(), usize::from(any_known));
            if let Some(picked) = featured.get(0) {
                let index: usize = picked.id.as_str().parse().unwrap();
                prop_assert!(known[index]);
            }
        }
    }
}
