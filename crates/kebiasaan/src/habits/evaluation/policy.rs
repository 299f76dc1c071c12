use super::config::RollUpPolicy;

/// Combine the present component ratings of a composite category.
pub(crate) fn roll_up(policy: RollUpPolicy, ratings: &[u8]) -> Option<u8> {
    if ratings.is_empty() {
        return None;
    }

    match policy {
        RollUpPolicy::Average => {
            let count = ratings.len() as u32;
            let sum: u32 = ratings.iter().map(|rating| u32::from(*rating)).sum();
            Some(((2 * sum + count) / (2 * count)) as u8)
        }
        RollUpPolicy::Weakest => ratings.iter().copied().min(),
    }
}
