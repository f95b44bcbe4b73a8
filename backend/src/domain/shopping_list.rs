//! Shopping-list ingredient aggregation and CSV export.
//!
//! Totals are never stored. Every read takes the current `(recipe,
//! ingredient, amount)` lines of the user's list and folds them here, so the
//! totals always match the selected recipes.

use std::collections::BTreeMap;

use super::{Amount, Ingredient, IngredientId, RecipeId};

/// Header row of the exported CSV.
pub const CSV_HEADER: [&str; 3] = ["Ingredient", "Measurement Unit", "Amount"];
/// File name offered to browsers for the export.
pub const CSV_FILE_NAME: &str = "shopping_list.csv";

/// One ingredient line of one recipe currently in a shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub recipe: RecipeId,
    pub ingredient: Ingredient,
    pub amount: Amount,
}

/// Sum of one ingredient across every recipe in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientTotal {
    pub ingredient: Ingredient,
    pub total: u64,
}

/// Aggregation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregationError {
    #[error("total for ingredient {ingredient} overflowed")]
    Overflow { ingredient: IngredientId },
}

/// Group `lines` by ingredient and sum their amounts.
///
/// Units are assumed consistent per ingredient, so no conversion happens.
/// The result is ordered by case-insensitive ingredient name, then id.
///
/// # Examples
/// ```
/// use cookbook::domain::{aggregate_ingredients, Amount, CartLine, Ingredient, IngredientId, RecipeId};
///
/// let flour = Ingredient::new(IngredientId::new(1), "flour", "g")?;
/// let line = |recipe, amount| CartLine {
///     recipe: RecipeId::new(recipe),
///     ingredient: flour.clone(),
///     amount: Amount::new(amount).expect("positive"),
/// };
/// let totals = aggregate_ingredients(&[line(1, 200), line(2, 100)]).expect("no overflow");
/// assert_eq!(totals[0].total, 300);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn aggregate_ingredients(lines: &[CartLine]) -> Result<Vec<IngredientTotal>, AggregationError> {
    let mut by_id: BTreeMap<IngredientId, IngredientTotal> = BTreeMap::new();
    for line in lines {
        let id = line.ingredient.id();
        let entry = by_id.entry(id).or_insert_with(|| IngredientTotal {
            ingredient: line.ingredient.clone(),
            total: 0,
        });
        entry.total = entry
            .total
            .checked_add(u64::from(line.amount.get()))
            .ok_or(AggregationError::Overflow { ingredient: id })?;
    }

    let mut totals: Vec<IngredientTotal> = by_id.into_values().collect();
    totals.sort_by_cached_key(|total| {
        (
            total.ingredient.name().to_lowercase(),
            total.ingredient.id(),
        )
    });
    Ok(totals)
}

/// Render totals as CSV with [`CSV_HEADER`] and CRLF line endings.
#[must_use]
pub fn render_csv(totals: &[IngredientTotal]) -> String {
    let mut out = String::new();
    push_record(&mut out, CSV_HEADER);
    for total in totals {
        let amount = total.total.to_string();
        push_record(
            &mut out,
            [
                total.ingredient.name(),
                total.ingredient.measurement_unit(),
                amount.as_str(),
            ],
        );
    }
    out
}

fn push_record<const N: usize>(out: &mut String, fields: [&str; N]) {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    fn ingredient(id: i64, name: &str, unit: &str) -> Ingredient {
        Ingredient::new(IngredientId::new(id), name, unit).expect("valid ingredient")
    }

    fn line(recipe: i64, ingredient: &Ingredient, amount: u32) -> CartLine {
        CartLine {
            recipe: RecipeId::new(recipe),
            ingredient: ingredient.clone(),
            amount: Amount::new(amount).expect("positive amount"),
        }
    }

    struct Pantry {
        flour: Ingredient,
        sugar: Ingredient,
        egg: Ingredient,
    }

    #[fixture]
    fn pantry() -> Pantry {
        Pantry {
            flour: ingredient(1, "flour", "g"),
            sugar: ingredient(2, "sugar", "g"),
            egg: ingredient(3, "egg", "pcs"),
        }
    }

    fn recipes_a_and_b(p: &Pantry) -> Vec<CartLine> {
        vec![
            line(1, &p.flour, 200),
            line(1, &p.sugar, 50),
            line(2, &p.flour, 100),
            line(2, &p.egg, 2),
        ]
    }

    fn as_tuples(totals: &[IngredientTotal]) -> Vec<(&str, &str, u64)> {
        totals
            .iter()
            .map(|t| (t.ingredient.name(), t.ingredient.measurement_unit(), t.total))
            .collect()
    }

    #[rstest]
    fn sums_amounts_per_ingredient(pantry: Pantry) {
        let totals = aggregate_ingredients(&recipes_a_and_b(&pantry)).expect("aggregates");
        assert_eq!(
            as_tuples(&totals),
            vec![("egg", "pcs", 2), ("flour", "g", 300), ("sugar", "g", 50)]
        );
    }

    #[rstest]
    fn csv_has_header_and_one_row_per_ingredient(pantry: Pantry) {
        let totals = aggregate_ingredients(&recipes_a_and_b(&pantry)).expect("aggregates");
        let csv = render_csv(&totals);
        let rows: Vec<&str> = csv.split("\r\n").filter(|row| !row.is_empty()).collect();
        assert_eq!(
            rows,
            vec![
                "Ingredient,Measurement Unit,Amount",
                "egg,pcs,2",
                "flour,g,300",
                "sugar,g,50",
            ]
        );
    }

    #[rstest]
    fn removing_then_re_adding_a_recipe_restores_totals(pantry: Pantry) {
        let all = recipes_a_and_b(&pantry);
        let before = aggregate_ingredients(&all).expect("aggregates");

        let without_b: Vec<CartLine> = all
            .iter()
            .filter(|l| l.recipe != RecipeId::new(2))
            .cloned()
            .collect();
        let reduced = aggregate_ingredients(&without_b).expect("aggregates");
        assert_eq!(as_tuples(&reduced), vec![("flour", "g", 200), ("sugar", "g", 50)]);

        let mut restored = without_b;
        restored.extend(all.iter().filter(|l| l.recipe == RecipeId::new(2)).cloned());
        assert_eq!(aggregate_ingredients(&restored).expect("aggregates"), before);
    }

    #[rstest]
    fn empty_list_yields_header_only() {
        let totals = aggregate_ingredients(&[]).expect("aggregates");
        assert!(totals.is_empty());
        assert_eq!(render_csv(&totals), "Ingredient,Measurement Unit,Amount\r\n");
    }

    #[rstest]
    fn orders_case_insensitively_then_by_id() {
        let upper = ingredient(9, "Apple", "pcs");
        let lower = ingredient(4, "apple", "g");
        let banana = ingredient(1, "banana", "pcs");
        let totals = aggregate_ingredients(&[
            line(1, &banana, 1),
            line(1, &upper, 1),
            line(1, &lower, 1),
        ])
        .expect("aggregates");
        let ids: Vec<i64> = totals.iter().map(|t| t.ingredient.id().get()).collect();
        assert_eq!(ids, vec![4, 9, 1]);
    }

    #[rstest]
    fn sums_beyond_u32_range() {
        let salt = ingredient(1, "salt", "g");
        let big = crate::domain::QUANTITY_MAX;
        let totals =
            aggregate_ingredients(&[line(1, &salt, big), line(2, &salt, big), line(3, &salt, big)])
                .expect("aggregates");
        assert_eq!(totals[0].total, u64::from(big) * 3);
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("salt, coarse", "\"salt, coarse\"")]
    #[case("5\" pan", "\"5\"\" pan\"")]
    fn quotes_fields_when_needed(#[case] raw: &str, #[case] expected: &str) {
        let mut out = String::new();
        push_field(&mut out, raw);
        assert_eq!(out, expected);
    }
}
