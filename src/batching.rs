//! Batch assignment model: one chosen seller column per card row
//!
//! Only the cost evaluation primitive lives here. The joint search for the
//! cheapest assignment across all cards (item prices plus shipping tiers) is
//! an extension point on top of `total_cost` and `change_seller`.

use crate::error::{BuywizardError, Result};
use crate::matrix::{PriceMatrix, NO_OFFER};
use crate::shipping::calc_shipping_cost;

/// A candidate assignment of every card to one seller column
#[derive(Debug, Clone)]
pub struct Batching<'a> {
    matrix: &'a PriceMatrix,
    seller_choice: Vec<usize>,
}

impl<'a> Batching<'a> {
    /// Assignment from explicit column choices, one per card row
    pub fn new(matrix: &'a PriceMatrix, seller_choice: Vec<usize>) -> Result<Self> {
        if seller_choice.len() != matrix.num_cards() {
            return Err(BuywizardError::InvalidAssignment(format!(
                "{} choices for {} cards",
                seller_choice.len(),
                matrix.num_cards()
            )));
        }
        if let Some(&col) = seller_choice.iter().find(|&&c| c >= matrix.num_sellers()) {
            return Err(BuywizardError::InvalidAssignment(format!(
                "seller column {} out of range ({} sellers)",
                col,
                matrix.num_sellers()
            )));
        }
        Ok(Self {
            matrix,
            seller_choice,
        })
    }

    /// Starting assignment: every card from its cheapest seller, ignoring
    /// shipping
    pub fn cheapest(matrix: &'a PriceMatrix) -> Self {
        let seller_choice = (0..matrix.num_cards())
            .map(|card| {
                let row = matrix.row(card);
                let mut best = 0;
                for (col, &price) in row.iter().enumerate() {
                    if price < row[best] {
                        best = col;
                    }
                }
                best
            })
            .collect();
        Self {
            matrix,
            seller_choice,
        }
    }

    pub fn seller_choice(&self) -> &[usize] {
        &self.seller_choice
    }

    /// Reassign one card to a different seller column
    pub fn change_seller(&mut self, card: usize, seller: usize) -> Result<()> {
        if card >= self.seller_choice.len() {
            return Err(BuywizardError::InvalidAssignment(format!(
                "card row {} out of range",
                card
            )));
        }
        if seller >= self.matrix.num_sellers() {
            return Err(BuywizardError::InvalidAssignment(format!(
                "seller column {} out of range",
                seller
            )));
        }
        self.seller_choice[card] = seller;
        Ok(())
    }

    /// Item counts per distinct seller column used, sorted by column
    pub fn batch_counts(&self) -> Vec<(usize, usize)> {
        let mut counts: Vec<(usize, usize)> = Vec::new();
        for &col in &self.seller_choice {
            match counts.iter_mut().find(|(c, _)| *c == col) {
                Some((_, n)) => *n += 1,
                None => counts.push((col, 1)),
            }
        }
        counts.sort_by_key(|&(col, _)| col);
        counts
    }

    /// Sum of matrix cells at the chosen columns. NO_OFFER cells poison the
    /// sum to infinity, marking the assignment as infeasible.
    pub fn item_cost(&self) -> f64 {
        self.seller_choice
            .iter()
            .enumerate()
            .map(|(card, &col)| self.matrix.get(card, col))
            .sum()
    }

    /// Shipping fees across all sellers used by this assignment
    pub fn shipping_cost(&self) -> Result<f64> {
        let mut total = 0.0;
        for (_, count) in self.batch_counts() {
            total += calc_shipping_cost(count)?;
        }
        Ok(total)
    }

    /// Item cost and shipping cost as separate components
    pub fn cost_breakdown(&self) -> Result<(f64, f64)> {
        Ok((self.item_cost(), self.shipping_cost()?))
    }

    pub fn total_cost(&self) -> Result<f64> {
        let (items, shipping) = self.cost_breakdown()?;
        Ok(items + shipping)
    }

    /// Whether every card actually has an offer at its chosen column
    pub fn is_feasible(&self) -> bool {
        self.seller_choice
            .iter()
            .enumerate()
            .all(|(card, &col)| self.matrix.get(card, col) != NO_OFFER)
    }
}

// TODO: joint seller-assignment search (minimize items + shipping across all
// cards), starting from Batching::cheapest and using change_seller moves.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cardmarket::{Address, Article, Seller};
    use crate::config::SearchFilters;

    fn article(price: f64, id_user: u64) -> Article {
        Article {
            price,
            seller: Seller {
                id_user,
                username: None,
                address: Address {
                    country: "NL".to_string(),
                },
            },
        }
    }

    /// The Island/Mountain matrix: rows [1.0, 2.0, inf], [inf, 0.5, 3.0]
    fn island_mountain() -> PriceMatrix {
        let filters = SearchFilters {
            countries: vec!["NL".to_string()],
            min_condition: None,
            id_language: None,
            max_results: None,
        };
        PriceMatrix::build(
            &["Island".to_string(), "Mountain".to_string()],
            &[
                vec![article(1.0, 1), article(2.0, 2)],
                vec![article(0.5, 2), article(3.0, 3)],
            ],
            &filters,
        )
    }

    #[test]
    fn cost_breakdown_returns_separate_components() {
        let matrix = island_mountain();
        // Island from seller A (col 0), Mountain from seller B (col 1)
        let batch = Batching::new(&matrix, vec![0, 1]).unwrap();

        let (items, shipping) = batch.cost_breakdown().unwrap();
        assert_eq!(items, 1.5);
        // Two sellers with one item each
        assert_eq!(shipping, 2.0 * 1.26);
        assert_eq!(batch.total_cost().unwrap(), items + shipping);
    }

    #[test]
    fn single_seller_pays_shipping_once() {
        let matrix = island_mountain();
        // Everything from seller B (col 1)
        let batch = Batching::new(&matrix, vec![1, 1]).unwrap();

        let (items, shipping) = batch.cost_breakdown().unwrap();
        assert_eq!(items, 2.5);
        assert_eq!(shipping, 1.26);
        assert_eq!(batch.batch_counts(), vec![(1, 2)]);
    }

    #[test]
    fn cheapest_picks_per_row_minimum() {
        let matrix = island_mountain();
        let batch = Batching::cheapest(&matrix);

        assert_eq!(batch.seller_choice(), &[0, 1]);
        assert!(batch.is_feasible());
        assert_eq!(batch.item_cost(), 1.5);
    }

    #[test]
    fn change_seller_reassigns_in_place() {
        let matrix = island_mountain();
        let mut batch = Batching::cheapest(&matrix);

        batch.change_seller(0, 1).unwrap();
        assert_eq!(batch.seller_choice(), &[1, 1]);
        assert_eq!(batch.item_cost(), 2.5);

        // Out-of-range moves are rejected and leave the batch untouched
        assert!(batch.change_seller(0, 99).is_err());
        assert!(batch.change_seller(99, 0).is_err());
        assert_eq!(batch.seller_choice(), &[1, 1]);
    }

    #[test]
    fn no_offer_cell_makes_assignment_infeasible() {
        let matrix = island_mountain();
        // Mountain from seller A, who does not stock it
        let batch = Batching::new(&matrix, vec![0, 0]).unwrap();

        assert!(!batch.is_feasible());
        assert_eq!(batch.item_cost(), f64::INFINITY);
        assert_eq!(batch.total_cost().unwrap(), f64::INFINITY);
    }

    #[test]
    fn new_validates_choice_length_and_bounds() {
        let matrix = island_mountain();
        assert!(Batching::new(&matrix, vec![0]).is_err());
        assert!(Batching::new(&matrix, vec![0, 3]).is_err());
        assert!(Batching::new(&matrix, vec![0, 2]).is_ok());
    }

    #[test]
    fn oversized_seller_batch_fails_shipping() {
        let filters = SearchFilters {
            countries: vec!["NL".to_string()],
            min_condition: None,
            id_language: None,
            max_results: None,
        };
        let cards: Vec<String> = (0..41).map(|i| format!("card{i}")).collect();
        let articles: Vec<Vec<Article>> =
            (0..41).map(|_| vec![article(1.0, 1)]).collect();
        let matrix = PriceMatrix::build(&cards, &articles, &filters);

        let batch = Batching::cheapest(&matrix);
        assert!(matches!(
            batch.shipping_cost().unwrap_err(),
            BuywizardError::ShippingTierExceeded(41)
        ));
    }
}
