// Test data - Random customer details for the checkout forms

use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Emma", "Robert", "Lisa", "James", "Maria",
    "William", "Jennifer", "Richard", "Patricia", "Charles",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez",
];

const EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Customer details entered on the first checkout step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    pub first_name: String,
    pub last_name: String,
    /// Five ASCII digits, first digit non-zero
    pub zip_code: String,
}

impl CustomerData {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            zip_code: zip_code.into(),
        }
    }
}

/// Random customer data from the thread-local generator.
pub fn generate_customer_data() -> CustomerData {
    CustomerDataGenerator::new().customer_data()
}

/// Random e-mail address such as `k3x9q0ab@outlook.com`.
pub fn generate_email() -> String {
    CustomerDataGenerator::new().email()
}

/// Random US-style phone number such as `(415) 555-0199`.
pub fn generate_phone_number() -> String {
    CustomerDataGenerator::new().phone_number()
}

/// Source of random test data.
///
/// `new()` draws from the thread-local generator; `from_seed()` gives a
/// reproducible sequence for tests that need stable input.
#[derive(Debug, Clone)]
pub struct CustomerDataGenerator<R = ThreadRng> {
    rng: R,
}

impl CustomerDataGenerator<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for CustomerDataGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerDataGenerator<StdRng> {
    /// Deterministic generator: the same seed yields the same sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> CustomerDataGenerator<R> {
    pub fn first_name(&mut self) -> String {
        pick(&mut self.rng, FIRST_NAMES).to_string()
    }

    pub fn last_name(&mut self) -> String {
        pick(&mut self.rng, LAST_NAMES).to_string()
    }

    /// Five-digit ZIP code in `10000..=99999`.
    pub fn zip_code(&mut self) -> String {
        self.rng.gen_range(10_000..=99_999u32).to_string()
    }

    pub fn customer_data(&mut self) -> CustomerData {
        CustomerData {
            first_name: self.first_name(),
            last_name: self.last_name(),
            zip_code: self.zip_code(),
        }
    }

    /// Eight base-36 characters at one of the common webmail domains.
    pub fn email(&mut self) -> String {
        let local: String = (0..8)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect();
        format!("{}@{}", local, pick(&mut self.rng, EMAIL_DOMAINS))
    }

    /// `(AAA) BBB-CCCC` with area code and exchange in `200..=999`.
    pub fn phone_number(&mut self) -> String {
        let area = self.rng.gen_range(200..=999u32);
        let exchange = self.rng.gen_range(200..=999u32);
        let line = self.rng.gen_range(1_000..=9_999u32);
        format!("({}) {}-{}", area, exchange, line)
    }
}

fn pick<R: Rng>(rng: &mut R, items: &'static [&'static str]) -> &'static str {
    // Lists are non-empty constants
    items.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_zip_code_is_five_digits() {
        let zip = Regex::new(r"^\d{5}$").unwrap();
        for _ in 0..200 {
            let data = generate_customer_data();
            assert!(zip.is_match(&data.zip_code), "bad zip {}", data.zip_code);
            assert!(!data.zip_code.starts_with('0'));
        }
    }

    #[test]
    fn test_names_come_from_lists() {
        let mut generator = CustomerDataGenerator::new();
        for _ in 0..50 {
            let data = generator.customer_data();
            assert!(FIRST_NAMES.contains(&data.first_name.as_str()));
            assert!(LAST_NAMES.contains(&data.last_name.as_str()));
        }
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let a: Vec<CustomerData> = {
            let mut g = CustomerDataGenerator::from_seed(42);
            (0..5).map(|_| g.customer_data()).collect()
        };
        let b: Vec<CustomerData> = {
            let mut g = CustomerDataGenerator::from_seed(42);
            (0..5).map(|_| g.customer_data()).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_email_and_phone_formats() {
        let email = Regex::new(r"^[0-9a-z]{8}@(gmail|yahoo|hotmail|outlook)\.com$").unwrap();
        let phone = Regex::new(r"^\([2-9]\d{2}\) [2-9]\d{2}-[1-9]\d{3}$").unwrap();
        let mut generator = CustomerDataGenerator::from_seed(7);
        for _ in 0..100 {
            let e = generator.email();
            let p = generator.phone_number();
            assert!(email.is_match(&e), "bad email {}", e);
            assert!(phone.is_match(&p), "bad phone {}", p);
        }
        assert!(email.is_match(&generate_email()));
        assert!(phone.is_match(&generate_phone_number()));
    }

    #[test]
    fn test_customer_data_json_shape() {
        let data = CustomerData::new("Jane", "Doe", "12345");
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["zipCode"], "12345");
        let back: CustomerData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }
}
