/// Output formatting: rankings table and JSON.
use eloarena_core::Item;
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankedItem {
    rank: usize,
    name: String,
    rating: i32,
    matches: u32,
}

#[derive(Serialize)]
struct JsonOutput {
    items: Vec<JsonRankedItem>,
    total_comparisons: usize,
}

/// Items sorted for display: rating descending, name as tiebreak.
pub fn ranked(items: &[Item]) -> Vec<&Item> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by(|a, b| {
        b.rating
            .cmp(&a.rating)
            .then_with(|| a.display_ref.cmp(&b.display_ref))
    });
    sorted
}

/// Print rankings as a formatted terminal table.
pub fn print_table(items: &[Item], total_comparisons: usize) {
    let sorted = ranked(items);

    // Find the widest item name for padding
    let name_width = sorted
        .iter()
        .map(|item| item.display_ref.len())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"

    // Header
    println!(" # | {:<name_width$} | Rating | Matches", "Item");
    println!("---|-{}-|--------|--------", "-".repeat(name_width));

    // Rows
    for (i, item) in sorted.iter().enumerate() {
        println!(
            "{:>2} | {:<name_width$} | {:>6} | {:>7}",
            i + 1,
            item.display_ref,
            item.rating,
            item.matches,
        );
    }

    println!(
        "\n{} items ranked ({} comparisons recorded)",
        sorted.len(),
        total_comparisons,
    );
}

/// Print rankings as JSON.
pub fn print_json(items: &[Item], total_comparisons: usize) {
    let ranked_items: Vec<JsonRankedItem> = ranked(items)
        .into_iter()
        .enumerate()
        .map(|(i, item)| JsonRankedItem {
            rank: i + 1,
            name: item.display_ref.clone(),
            rating: item.rating,
            matches: item.matches,
        })
        .collect();

    let output = JsonOutput {
        items: ranked_items,
        total_comparisons,
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_orders_by_rating_then_name() {
        let mut a = Item::new("1", "alpha");
        let mut b = Item::new("2", "beta");
        let mut c = Item::new("3", "gamma");
        a.rating = 1390;
        b.rating = 1420;
        c.rating = 1420;

        let items = [a, b, c];
        let sorted = ranked(&items);
        let names: Vec<&str> = sorted.iter().map(|i| i.display_ref.as_str()).collect();
        assert_eq!(names, vec!["beta", "gamma", "alpha"]);
    }
}
