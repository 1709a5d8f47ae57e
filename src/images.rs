//! Image Reference Resolution

use smallvec::SmallVec;

/// Base directories probed for image references, in order.
const IMAGE_BASES: [&str; 2] = ["/assets/images/products/", "/assets/images/"];

/// Swaps a filename between the two interchangeable raster formats:
/// `.png` becomes `.webp` and vice versa. Any other name is returned
/// unchanged, matching on the extension case-insensitively.
#[must_use]
pub fn swap_ext(name: &str) -> String {
    let lower = name.to_ascii_lowercase();

    if lower.ends_with(".png") {
        if let Some(stem) = name.get(..name.len() - 4) {
            return format!("{stem}.webp");
        }
    } else if lower.ends_with(".webp") {
        if let Some(stem) = name.get(..name.len() - 5) {
            return format!("{stem}.png");
        }
    }

    name.to_owned()
}

/// Ordered candidate sources for an image reference.
///
/// An absolute reference (leading slash) is tried first as-is, then with
/// its extension swapped; after that both variants are tried under each
/// known base directory, which also covers references with subfolders such
/// as `products/TrippTrapp1.png`. An empty reference yields no candidates.
/// Identical candidates are not deduplicated.
#[must_use]
pub fn candidates(filename: &str) -> SmallVec<[String; 8]> {
    let mut sources = SmallVec::new();

    if filename.is_empty() {
        return sources;
    }

    if filename.starts_with('/') {
        sources.push(filename.to_owned());
        sources.push(swap_ext(filename));
    }

    for base in IMAGE_BASES {
        sources.push(format!("{base}{filename}"));
        sources.push(format!("{base}{}", swap_ext(filename)));
    }

    sources
}

/// Walks the candidate chain with `probe`, returning the first source that
/// loads.
///
/// Candidates are attempted strictly in order, one probe each: no retry, no
/// backoff. Exhausting the chain yields `None` and is not an error; the
/// caller leaves the reference in its last failed state.
pub fn resolve<F>(filename: &str, mut probe: F) -> Option<String>
where
    F: FnMut(&str) -> bool,
{
    candidates(filename)
        .into_iter()
        .find(|candidate| probe(candidate))
}
