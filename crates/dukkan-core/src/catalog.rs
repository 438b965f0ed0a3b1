//! The store's fixed product list

use crate::error::{Result, ValidationError};
use crate::order::CartLine;

/// A product on the shelf
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Product {
    pub name: &'static str,
    pub price: f64,
    pub image_url: &'static str,
}

impl Product {
    /// Builds the cart line for `quantity` of this product
    pub fn to_line(&self, quantity: u32) -> CartLine {
        CartLine::new(self.name, self.price, quantity)
    }
}

static PRODUCTS: [Product; 10] = [
    Product {
        name: "تيشيرت رجالي أسود",
        price: 250.0,
        image_url: "https://media-art.net/wp-content/uploads/2024/10/unisex-classic-tee-black-front-6702c2bda9757.jpg",
    },
    Product {
        name: "تيشيرت رجالي أبيض",
        price: 230.0,
        image_url: "https://images.unsplash.com/photo-1520974735194-6c07f7c9e7b6",
    },
    Product {
        name: "بنطال جينز رجالي",
        price: 400.0,
        image_url: "https://images.unsplash.com/photo-1503341455253-b2e723bb3dbb",
    },
    Product {
        name: "جاكيت شتوي",
        price: 650.0,
        image_url: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab",
    },
    Product {
        name: "هودي كاجوال",
        price: 500.0,
        image_url: "https://images.unsplash.com/photo-1602810318383-eed6f34f24d6",
    },
    Product {
        name: "قميص كلاسيك",
        price: 300.0,
        image_url: "https://images.unsplash.com/photo-1541099649105-f69ad21f3246",
    },
    Product {
        name: "تيشيرت أطفال",
        price: 180.0,
        image_url: "https://images.unsplash.com/photo-1620799139504-3f81d3a7a4a0",
    },
    Product {
        name: "فستان صيفي",
        price: 550.0,
        image_url: "https://images.unsplash.com/photo-1503342217505-b0a15ec3261c",
    },
    Product {
        name: "بنطال رياضي",
        price: 270.0,
        image_url: "https://images.unsplash.com/photo-1618354691330-37d315f3a4b2",
    },
    Product {
        name: "حذاء رياضي",
        price: 600.0,
        image_url: "https://images.unsplash.com/photo-1528701800489-20be9c1e88cd",
    },
];

/// Every product the store sells, in display order
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

/// Read-only view over a product list, addressed by zero-based index
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    products: &'static [Product],
}

impl Catalog {
    pub fn new(products: &'static [Product]) -> Self {
        Self { products }
    }

    pub fn get(&self, index: usize) -> Option<&'static Product> {
        self.products.get(index)
    }

    /// Like [`Catalog::get`] but reports an unknown index as a validation error
    pub fn require(&self, index: usize) -> Result<&'static Product> {
        self.get(index)
            .ok_or_else(|| ValidationError::UnknownProduct(index).into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(products())
    }
}
