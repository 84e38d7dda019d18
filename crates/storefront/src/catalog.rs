//! Product catalog and listing queries.
//!
//! The storefront ships a fixed eight-product demo catalog. Listings are a
//! linear filter-then-sort over it, mirroring the product page controls:
//! category chips, a search box, a price range slider, a minimum rating
//! slider and a sort dropdown.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use cendev_core::{Price, ProductId};

use crate::models::{Product, Rating};

/// How many related products the detail page shows.
pub const RELATED_LIMIT: usize = 4;

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most reviewed first.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// Alphabetical by name.
    Name,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            "name" => Ok(Self::Name),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Filters and ordering for a product listing.
///
/// The default query matches every product, most reviewed first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    /// Category label, compared case-insensitively. `None` means all.
    pub category: Option<String>,
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,
    /// Minimum average rating.
    pub min_rating: Option<f32>,
    pub sort: SortOrder,
}

impl ProductQuery {
    /// Whether `product` passes every filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let category = self
            .category
            .as_deref()
            .is_none_or(|c| c.eq_ignore_ascii_case("all") || product.category.eq_ignore_ascii_case(c));

        let search = self.search.as_deref().map(str::to_lowercase);
        let search = search.as_deref().is_none_or(|needle| {
            product.name.to_lowercase().contains(needle)
                || product.description.to_lowercase().contains(needle)
        });

        let amount = product.price.amount();
        let price = self.min_price.is_none_or(|min| amount >= min)
            && self.max_price.is_none_or(|max| amount <= max);

        let rating = self
            .min_rating
            .is_none_or(|min| product.rating.value() >= min);

        category && search && price && rating
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self.sort {
            SortOrder::Featured => b.reviews.cmp(&a.reviews),
            SortOrder::PriceLow => a.price.cmp(&b.price),
            SortOrder::PriceHigh => b.price.cmp(&a.price),
            SortOrder::Rating => b.rating.value().total_cmp(&a.rating.value()),
            SortOrder::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    }
}

/// Number of products in a category, for the category chips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Lowercase slug (`"all"`, `"hardware"`).
    pub id: String,
    /// Display name.
    pub name: String,
    pub count: usize,
}

/// An immutable set of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wraps an externally supplied product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in demo catalog.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(demo_products())
    }

    /// Every product in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks a product up by identifier.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    /// Products flagged for the home page.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// Runs a listing query.
    #[must_use]
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut matches: Vec<&Product> = self.products.iter().filter(|p| query.matches(p)).collect();
        matches.sort_by(|a, b| query.compare(a, b));
        matches
    }

    /// Other products in the same category, up to [`RELATED_LIMIT`].
    #[must_use]
    pub fn related(&self, product: &Product) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(RELATED_LIMIT)
            .collect()
    }

    /// Product counts per category, starting with the "all" bucket.
    ///
    /// Categories appear in the order they are first seen in the catalog.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts = vec![CategoryCount {
            id: "all".to_owned(),
            name: "All Products".to_owned(),
            count: self.products.len(),
        }];
        for product in &self.products {
            let id = product.category.to_lowercase();
            if let Some(existing) = counts.iter_mut().skip(1).find(|c| c.id == id) {
                existing.count += 1;
            } else {
                counts.push(CategoryCount {
                    id,
                    name: product.category.clone(),
                    count: 1,
                });
            }
        }
        counts
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}

struct DemoProduct {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: u32,
    original_cents: Option<u32>,
    image: &'static str,
    category: &'static str,
    rating: f32,
    reviews: u32,
    featured: bool,
    tags: &'static [&'static str],
}

const DEMO_PRODUCTS: &[DemoProduct] = &[
    DemoProduct {
        id: "1",
        name: "Premium Developer Laptop",
        description: "High-performance laptop with 32GB RAM, optimized for development and multitasking",
        price_cents: 189_999,
        original_cents: Some(219_999),
        image: "https://images.unsplash.com/photo-1675495277087-10598bf7bcd1",
        category: "Hardware",
        rating: 4.8,
        reviews: 342,
        featured: true,
        tags: &["New", "Best Seller"],
    },
    DemoProduct {
        id: "2",
        name: "Mechanical Keyboard Pro",
        description: "RGB mechanical keyboard with custom switches, perfect for coding marathons",
        price_cents: 14_999,
        original_cents: None,
        image: "https://images.unsplash.com/photo-1618586810102-aaa7049200c0",
        category: "Hardware",
        rating: 4.6,
        reviews: 189,
        featured: true,
        tags: &["Popular"],
    },
    DemoProduct {
        id: "3",
        name: "Noise-Canceling Headphones",
        description: "Premium headphones for focused coding sessions with crystal clear audio",
        price_cents: 27_999,
        original_cents: Some(34_999),
        image: "https://images.unsplash.com/photo-1624896386637-c267401a1781",
        category: "Hardware",
        rating: 4.9,
        reviews: 521,
        featured: true,
        tags: &["Sale"],
    },
    DemoProduct {
        id: "4",
        name: "4K Developer Monitor",
        description: "32\" 4K monitor with 99% sRGB, ideal for coding and design work",
        price_cents: 59_999,
        original_cents: None,
        image: "https://images.unsplash.com/photo-1649704394792-9cd6a3995cc5",
        category: "Hardware",
        rating: 4.7,
        reviews: 267,
        featured: false,
        tags: &["Premium"],
    },
    DemoProduct {
        id: "5",
        name: "Ergonomic Mouse",
        description: "Wireless ergonomic mouse designed for long coding sessions",
        price_cents: 7_999,
        original_cents: None,
        image: "https://images.unsplash.com/photo-1615663245857-ac93bb7c39e7",
        category: "Hardware",
        rating: 4.5,
        reviews: 143,
        featured: false,
        tags: &[],
    },
    DemoProduct {
        id: "6",
        name: "Clean Code - Advanced Edition",
        description: "The definitive guide to writing clean, maintainable code",
        price_cents: 4_999,
        original_cents: None,
        image: "https://images.unsplash.com/photo-1532012197267-da84d127e765",
        category: "Books",
        rating: 4.9,
        reviews: 892,
        featured: false,
        tags: &["Best Seller"],
    },
    DemoProduct {
        id: "7",
        name: "Full Stack Development Course",
        description: "Complete video course covering React, Node.js, and databases",
        price_cents: 19_999,
        original_cents: Some(29_999),
        image: "https://images.unsplash.com/photo-1498050108023-c5249f4df085",
        category: "Courses",
        rating: 4.8,
        reviews: 1_243,
        featured: true,
        tags: &["Sale", "Popular"],
    },
    DemoProduct {
        id: "8",
        name: "GitHub Copilot Pro",
        description: "Annual subscription to AI-powered coding assistant",
        price_cents: 9_999,
        original_cents: None,
        image: "https://images.unsplash.com/photo-1555066931-4365d14bab8c",
        category: "Software",
        rating: 4.7,
        reviews: 678,
        featured: false,
        tags: &["Subscription"],
    },
];

fn demo_products() -> Vec<Product> {
    DEMO_PRODUCTS
        .iter()
        .map(|d| Product {
            id: ProductId::new(d.id),
            name: d.name.to_owned(),
            description: d.description.to_owned(),
            price: Price::from_u32_cents(d.price_cents),
            original_price: d.original_cents.map(Price::from_u32_cents),
            image: d.image.to_owned(),
            category: d.category.to_owned(),
            rating: Rating::saturating(d.rating),
            reviews: d.reviews,
            in_stock: true,
            featured: d.featured,
            tags: d.tags.iter().map(|t| (*t).to_owned()).collect(),
        })
        .collect()
}
