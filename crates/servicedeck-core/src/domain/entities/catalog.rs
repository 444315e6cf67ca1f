//! Built-in seed catalog shown after pressing the secondary action.

use super::service::NewService;

const SEED_ENTRIES: [(&str, &str); 6] = [
    ("Amplify", "Build full-stack web & mobile apps"),
    ("AppSync", "Managed GraphQL service"),
    ("Cognito", "Authentication & user management"),
    ("Pinpoint", "User engagement & communications"),
    ("Location Service", "Maps & location features"),
    ("Device Farm", "Test on real devices"),
];

/// The six seed records, in creation order.
pub fn seed_catalog() -> Vec<NewService> {
    SEED_ENTRIES
        .iter()
        .map(|(title, description)| NewService::new(*title, *description))
        .collect()
}
