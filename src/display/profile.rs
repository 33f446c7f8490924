//! Profile display formatting

use crate::models::UserProfile;

pub fn format_profile(profile: &UserProfile) -> String {
    let mut output = String::new();

    output.push_str(&format!("Profile: {}\n", profile.name));
    output.push_str(&format!("  Email:    {}\n", profile.email));
    output.push_str(&format!("  User ID:  {}\n", profile.id.as_uuid()));
    output.push_str(&format!(
        "  Currency: {} ({})\n",
        profile.preferences.currency,
        profile.preferences.currency.symbol()
    ));
    output.push_str(&format!("  Theme:    {}\n", profile.preferences.theme));
    output.push_str(&format!(
        "  Member since: {}\n",
        profile.created_at.format("%Y-%m-%d")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, UserId};

    #[test]
    fn test_format_profile() {
        let mut profile = UserProfile::new(UserId::new(), "ana@example.com", "Ana");
        profile.preferences.currency = Currency::Gbp;

        let output = format_profile(&profile);
        assert!(output.contains("Profile: Ana"));
        assert!(output.contains("Currency: GBP (£)"));
    }
}
