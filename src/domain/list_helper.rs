//! Pure aggregation helpers over collections of blogs.
//!
//! Every function here reads a slice of [`Blog`] records and produces a
//! summary value. Nothing is persisted or mutated, so the helpers are safe to
//! call from any thread.
//!
//! # Tie-break policy
//!
//! Leaders are found with a left-to-right running-maximum scan. The current
//! leader is only replaced by a *strictly* greater value, so the first
//! candidate reaching the maximum wins. For the author-based helpers the scan
//! runs over authors in the order each author was first seen in the input.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::entities::Blog;

/// Errors raised by the aggregation helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListHelperError {
    /// A leader was requested from a collection with no blogs in it.
    #[error("cannot pick a leader from an empty blog collection")]
    EmptyCollection,

    /// A like sum does not fit in an `i64`.
    #[error("like count overflowed")]
    LikesOverflow,
}

/// Projection of the most liked blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavouriteBlog {
    pub title: String,
    pub author: String,
    pub likes: i64,
}

/// Author with the most blogs and how many they wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogCount {
    pub author: String,
    pub count: i64,
}

/// Author with the most likes summed over all of their blogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: String,
    pub likes: i64,
}

/// Always returns `1`. Used as a smoke test for the helper wiring.
pub fn dummy(_blogs: &[Blog]) -> i64 {
    1
}

/// Sums the likes of every blog. An empty collection sums to `0`.
///
/// # Errors
///
/// Returns [`ListHelperError::LikesOverflow`] when the sum exceeds `i64::MAX`.
pub fn total_likes(blogs: &[Blog]) -> Result<i64, ListHelperError> {
    blogs.iter().try_fold(0i64, |sum, blog| {
        sum.checked_add(blog.likes)
            .ok_or(ListHelperError::LikesOverflow)
    })
}

/// Returns the blog with the most likes, first one wins on ties.
///
/// # Errors
///
/// Returns [`ListHelperError::EmptyCollection`] when `blogs` is empty.
pub fn favourite_blog(blogs: &[Blog]) -> Result<FavouriteBlog, ListHelperError> {
    let (first, rest) = blogs
        .split_first()
        .ok_or(ListHelperError::EmptyCollection)?;

    let mut favourite = first;
    for blog in rest {
        if blog.likes > favourite.likes {
            favourite = blog;
        }
    }

    Ok(FavouriteBlog {
        title: favourite.title.clone(),
        author: favourite.author.clone(),
        likes: favourite.likes,
    })
}

/// Returns the author with the most blogs.
///
/// # Errors
///
/// Returns [`ListHelperError::EmptyCollection`] when `blogs` is empty.
pub fn most_blogs(blogs: &[Blog]) -> Result<AuthorBlogCount, ListHelperError> {
    let (author, count) = leader(tally_by_author(blogs, |_| 1)?)?;

    Ok(AuthorBlogCount {
        author: author.to_string(),
        count,
    })
}

/// Returns the author whose blogs have the most likes in total.
///
/// # Errors
///
/// Returns [`ListHelperError::EmptyCollection`] when `blogs` is empty, and
/// [`ListHelperError::LikesOverflow`] when one author's likes exceed `i64::MAX`.
pub fn most_likes(blogs: &[Blog]) -> Result<AuthorLikes, ListHelperError> {
    let (author, likes) = leader(tally_by_author(blogs, |blog| blog.likes)?)?;

    Ok(AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

/// Groups blogs by author, accumulating `value` per blog.
///
/// The returned pairs are in first-insertion order of the authors.
fn tally_by_author<'a>(
    blogs: &'a [Blog],
    value: impl Fn(&Blog) -> i64,
) -> Result<Vec<(&'a str, i64)>, ListHelperError> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tally: Vec<(&str, i64)> = Vec::new();

    for blog in blogs {
        let author = blog.author.as_str();
        match index.get(author) {
            Some(&slot) => {
                let total = &mut tally[slot].1;
                *total = total
                    .checked_add(value(blog))
                    .ok_or(ListHelperError::LikesOverflow)?;
            }
            None => {
                index.insert(author, tally.len());
                tally.push((author, value(blog)));
            }
        }
    }

    Ok(tally)
}

/// Picks the entry with the greatest value; earlier entries win ties.
fn leader(tally: Vec<(&str, i64)>) -> Result<(&str, i64), ListHelperError> {
    let mut entries = tally.into_iter();
    let mut best = entries.next().ok_or(ListHelperError::EmptyCollection)?;

    for entry in entries {
        if entry.1 > best.1 {
            best = entry;
        }
    }

    Ok(best)
}
