pub mod expense;
pub mod holiday;

/// Next id for a record created at `timestamp_millis`: the timestamp itself,
/// unless an existing id is already at or past it.
pub(crate) fn next_id<'a, I>(timestamp_millis: i64, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let latest = existing
        .into_iter()
        .filter_map(|id| id.parse::<i64>().ok())
        .max();

    match latest {
        Some(latest) if latest >= timestamp_millis => (latest + 1).to_string(),
        _ => timestamp_millis.to_string(),
    }
}
