//! Human-readable placeholder app IDs.

use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "amber", "ancient", "autumn", "bold", "brave", "bright", "calm", "clever", "cosmic", "crimson",
    "curious", "dancing", "daring", "dusty", "eager", "electric", "fancy", "fearless", "frosty",
    "gentle", "golden", "grand", "happy", "hidden", "humble", "icy", "jolly", "keen", "lively",
    "lucky", "mellow", "misty", "noble", "odd", "polished", "proud", "quiet", "rapid", "restless",
    "rusty", "shiny", "silent", "silver", "sleepy", "snowy", "solar", "steady", "swift", "tidy",
    "velvet", "wandering", "wild", "wise", "witty", "young", "zesty",
];

const NOUNS: &[&str] = &[
    "badger", "beacon", "bear", "canyon", "cedar", "comet", "coyote", "crane", "dolphin", "dragon",
    "eagle", "ember", "falcon", "fern", "fox", "glacier", "griffin", "harbor", "hawk", "heron",
    "island", "jaguar", "koala", "lantern", "lynx", "meadow", "meteor", "moose", "nebula", "otter",
    "owl", "panther", "pebble", "phoenix", "pine", "puma", "quasar", "raven", "river", "rocket",
    "sparrow", "squid", "summit", "thunder", "tiger", "tundra", "valley", "viper", "walrus",
    "willow", "wolf", "yak", "zebra",
];

/// Generate a two-word app ID such as `brave-falcon`.
pub fn generate_app_id() -> String {
    generate_app_id_with(&mut rand::thread_rng())
}

/// Generate a two-word app ID from the given random source.
pub fn generate_app_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    format!("{adjective} {noun}").replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_id_is_two_hyphenated_words() {
        let id = generate_app_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 2, "unexpected id {id}");
        assert!(ADJECTIVES.contains(&parts[0]));
        assert!(NOUNS.contains(&parts[1]));
        assert!(!id.contains(' '));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_app_id_with(&mut StdRng::seed_from_u64(7));
        let b = generate_app_id_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn word_lists_are_single_words() {
        for word in ADJECTIVES.iter().chain(NOUNS) {
            assert!(!word.is_empty());
            assert!(!word.contains(' ') && !word.contains('-'));
        }
    }
}
