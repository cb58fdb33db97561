// Storefront catalog - The six products and price arithmetic

/// One product of the storefront inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Inventory id, as used by the item detail links
    pub id: u32,
    pub name: &'static str,
    /// Key used in `data-test` ids (`add-to-cart-<slug>`, `remove-<slug>`)
    pub slug: &'static str,
    pub description: &'static str,
    pub price_cents: u64,
}

impl Product {
    /// Display price such as `$29.99`
    pub fn price(&self) -> String {
        format_cents(self.price_cents)
    }
}

pub const CATALOG: &[Product] = &[
    Product {
        id: 4,
        name: "Sauce Labs Backpack",
        slug: "sauce-labs-backpack",
        description: "carry.allTheThings() with the sleek, streamlined Sly Pack that melds uncompromising style with unequaled laptop and tablet protection.",
        price_cents: 2999,
    },
    Product {
        id: 0,
        name: "Sauce Labs Bike Light",
        slug: "sauce-labs-bike-light",
        description: "A red light isn't the desired state in testing but it sure helps when riding your bike at night. Water-resistant with 3 lighting modes, 1 AAA battery included.",
        price_cents: 999,
    },
    Product {
        id: 1,
        name: "Sauce Labs Bolt T-Shirt",
        slug: "sauce-labs-bolt-t-shirt",
        description: "Get your testing superhero on with the Sauce Labs bolt T-shirt. From American Apparel, 100% ringspun combed cotton, heather gray with red bolt.",
        price_cents: 1599,
    },
    Product {
        id: 5,
        name: "Sauce Labs Fleece Jacket",
        slug: "sauce-labs-fleece-jacket",
        description: "It's not every day that you come across a midweight quarter-zip fleece jacket capable of handling everything from a relaxing day outdoors to a busy day at the office.",
        price_cents: 4999,
    },
    Product {
        id: 2,
        name: "Sauce Labs Onesie",
        slug: "sauce-labs-onesie",
        description: "Rib snap infant onesie for the junior automation engineer in development. Reinforced 3-snap bottom closure, two-needle hemmed sleeved and bottom won't unravel.",
        price_cents: 799,
    },
    Product {
        id: 3,
        name: "Test.allTheThings() T-Shirt (Red)",
        slug: "test.allthethings()-t-shirt-(red)",
        description: "This classic Sauce Labs t-shirt is perfect to wear when cozying up to your keyboard to automate a few tests. Super-soft and comfy ringspun combed cotton.",
        price_cents: 1599,
    },
];

/// Sales tax applied at checkout, in percent
const TAX_PERCENT: u64 = 8;

pub fn find_by_slug(slug: &str) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.slug == slug)
}

/// Tax on `subtotal_cents`, rounded half up to the cent
pub fn tax_cents(subtotal_cents: u64) -> u64 {
    (subtotal_cents * TAX_PERCENT + 50) / 100
}

/// `$D.CC` rendering of a cent amount
pub fn format_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Inventory orderings offered by the sort dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Sort {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl Sort {
    pub(crate) const OPTIONS: [(&'static str, &'static str); 4] = [
        ("az", "Name (A to Z)"),
        ("za", "Name (Z to A)"),
        ("lohi", "Price (low to high)"),
        ("hilo", "Price (high to low)"),
    ];

    pub(crate) fn from_value(value: &str) -> Option<Self> {
        match value {
            "az" => Some(Sort::NameAsc),
            "za" => Some(Sort::NameDesc),
            "lohi" => Some(Sort::PriceAsc),
            "hilo" => Some(Sort::PriceDesc),
            _ => None,
        }
    }

    pub(crate) fn value(self) -> &'static str {
        match self {
            Sort::NameAsc => "az",
            Sort::NameDesc => "za",
            Sort::PriceAsc => "lohi",
            Sort::PriceDesc => "hilo",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        Self::OPTIONS
            .iter()
            .find(|(v, _)| *v == self.value())
            .map(|(_, label)| *label)
            .unwrap_or_default()
    }

    /// Catalog in this order; price ties keep name order.
    pub(crate) fn apply(self) -> Vec<&'static Product> {
        let mut products: Vec<&'static Product> = CATALOG.iter().collect();
        products.sort_by(|a, b| a.name.cmp(b.name));
        match self {
            Sort::NameAsc => {}
            Sort::NameDesc => products.reverse(),
            Sort::PriceAsc => products.sort_by_key(|p| p.price_cents),
            Sort::PriceDesc => products.sort_by(|a, b| b.price_cents.cmp(&a.price_cents)),
        }
        products
    }
}
