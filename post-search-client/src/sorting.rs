use crate::{Order, Post, SortColumn};
use std::cmp::Ordering;

fn compare_ascending(column: SortColumn, a: &Post, b: &Post) -> Ordering {
    match column {
        SortColumn::Id => a.id().cmp(&b.id()),
        SortColumn::Reads => a.reads().cmp(&b.reads()),
        SortColumn::Likes => a.likes().cmp(&b.likes()),
        SortColumn::Popularity => a.popularity().total_cmp(&b.popularity()),
    }
}

/// Comparator for `column` in `order`. Descending is ascending with the
/// operands swapped.
pub fn comparator(column: SortColumn, order: Order) -> impl Fn(&Post, &Post) -> Ordering {
    move |a, b| match order {
        Order::Ascending => compare_ascending(column, a, b),
        Order::Descending => compare_ascending(column, b, a),
    }
}

/// Stable sort: posts that compare equal keep their merge order.
pub fn sort_posts(posts: &mut [Post], column: SortColumn, order: Order) {
    posts.sort_by(comparator(column, order));
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn post(id: i64, likes: i64, popularity: f64, reads: i64) -> Post {
        Post::new(id, format!("author {id}"), id * 10, likes, popularity, reads, vec![])
    }

    fn sample() -> Vec<Post> {
        vec![
            post(4, 40, 0.31, 1_000),
            post(1, 75, 0.92, 500),
            post(3, 12, 0.05, 9_000),
            post(2, 33, 0.47, 2_500),
        ]
    }

    fn key(column: SortColumn, post: &Post) -> f64 {
        match column {
            SortColumn::Id => post.id() as f64,
            SortColumn::Reads => post.reads() as f64,
            SortColumn::Likes => post.likes() as f64,
            SortColumn::Popularity => post.popularity(),
        }
    }

    #[test]
    fn test_every_column_and_order_is_fully_ordered() {
        for column in SortColumn::iter() {
            for order in Order::iter() {
                let mut posts = sample();
                sort_posts(&mut posts, column, order);
                for pair in posts.windows(2) {
                    let (a, b) = (key(column, &pair[0]), key(column, &pair[1]));
                    match order {
                        Order::Ascending => assert!(a <= b, "{column} {order}: {a} > {b}"),
                        Order::Descending => assert!(a >= b, "{column} {order}: {a} < {b}"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_descending_mirrors_ascending_without_ties() {
        for column in SortColumn::iter() {
            let mut ascending = sample();
            sort_posts(&mut ascending, column, Order::Ascending);
            let mut descending = sample();
            sort_posts(&mut descending, column, Order::Descending);

            descending.reverse();
            assert_eq!(ascending, descending, "column {column}");
        }
    }

    #[test]
    fn test_negative_values_order_numerically() {
        let mut posts = vec![post(2, 3, 0.1, 0), post(-5, -10, 0.2, -1), post(0, 0, 0.3, 7)];
        sort_posts(&mut posts, SortColumn::Likes, Order::Ascending);
        let ids: Vec<i64> = posts.iter().map(Post::id).collect();
        assert_eq!(ids, vec![-5, 0, 2]);

        sort_posts(&mut posts, SortColumn::Id, Order::Descending);
        let ids: Vec<i64> = posts.iter().map(Post::id).collect();
        assert_eq!(ids, vec![2, 0, -5]);
    }

    #[test]
    fn test_ties_keep_merge_order() {
        let mut posts = vec![post(9, 5, 0.1, 1), post(3, 5, 0.2, 2), post(6, 5, 0.3, 3)];
        sort_posts(&mut posts, SortColumn::Likes, Order::Descending);
        let ids: Vec<i64> = posts.iter().map(Post::id).collect();
        assert_eq!(ids, vec![9, 3, 6]);

        sort_posts(&mut posts, SortColumn::Likes, Order::Ascending);
        let ids: Vec<i64> = posts.iter().map(Post::id).collect();
        assert_eq!(ids, vec![9, 3, 6]);
    }
}
