/// Resolve an index reference to a collection key by trailing-substring match.
///
/// Exported folders usually prefix every path with a root folder name that the
/// index's relative references do not carry, so exact lookup would miss. When
/// several keys end with `href` the first one yielded by `keys` wins; callers
/// control the iteration order.
pub fn resolve_by_suffix<'a, I>(keys: I, href: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter().find(|key| key.ends_with(href))
}
