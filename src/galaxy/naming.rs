use rand::Rng;
use rand_chacha::ChaCha8Rng;

const PREFIXES: &[&str] = &[
    "Alpha", "Beta", "Gamma", "Delta", "Nova", "Proxima", "Sirius", "Vega", "Rigel", "Antares",
    "Polaris", "Centauri", "Cygnus", "Lyra", "Orion", "Andromeda", "Cassiopeia", "Perseus",
];

const SUFFIXES: &[&str] = &[
    "Prime", "Minor", "Major", "Core", "Binary", "Nexus", "Gateway", "Hub", "Cluster", "Network",
    "System", "Complex", "Station",
];

const NUMERALS: &[&str] = &["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

/// Chance of a numeral suffix instead of a word suffix.
const NUMERAL_CHANCE: f64 = 0.3;

fn pick<'a>(words: &[&'a str], rng: &mut ChaCha8Rng) -> &'a str {
    words[rng.gen_range(0..words.len())]
}

/// Random star system name such as "Vega Nexus" or "Lyra IV".
pub fn system_name(rng: &mut ChaCha8Rng) -> String {
    let prefix = pick(PREFIXES, rng);
    if rng.gen_bool(NUMERAL_CHANCE) {
        format!("{} {}", prefix, pick(NUMERALS, rng))
    } else {
        format!("{} {}", prefix, pick(SUFFIXES, rng))
    }
}

/// Planets are named after their system and orbit.
pub fn planet_name(system_name: &str, orbit_number: u32) -> String {
    format!("{} {}", system_name, orbit_number)
}
