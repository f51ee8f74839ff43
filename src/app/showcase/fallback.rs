//! 内置示例商品，在目录为空或不可用时展示

use chrono::Utc;

use super::model::Product;

/// 返回固定的两个示例商品，顺序固定，不参与过滤和洗牌
pub fn fallback_products() -> Vec<Product> {
    let now = Utc::now();

    vec![
        Product {
            id: 999,
            name: "OnePlus Nord Buds 3 Pro".to_string(),
            description: "Experience premium sound quality with active noise cancellation"
                .to_string(),
            price: 2500.0,
            original_price: Some(3200.0),
            category: "Earphone".to_string(),
            features: vec![
                "10 mins for 11 hrs fast charging".to_string(),
                "Up to 49 dB Smart Noise Cancellation".to_string(),
                "6,000 Hz Hi-Res Audio".to_string(),
            ],
            image_url: Some("/products/earphones.png".to_string()),
            discount: 22,
            hidden_on_home: false,
            rating: 4.8,
            reviews: 1250,
            stock_quantity: 50,
            color: Some("Pearl White".to_string()),
            created_at: now,
            updated_at: now,
        },
        Product {
            id: 998,
            name: "Gaming Mechanical Keyboard".to_string(),
            description: "RGB backlit mechanical keyboard with Cherry MX switches".to_string(),
            price: 8500.0,
            original_price: Some(10000.0),
            category: "Keyboard".to_string(),
            features: vec![
                "Cherry MX Blue switches".to_string(),
                "RGB backlight customization".to_string(),
                "Programmable macro keys".to_string(),
            ],
            image_url: Some("/products/keyboard.png".to_string()),
            discount: 15,
            hidden_on_home: false,
            rating: 4.6,
            reviews: 890,
            stock_quantity: 25,
            color: Some("Black".to_string()),
            created_at: now,
            updated_at: now,
        },
    ]
}
