//! Demo catalog of construction materials

use crate::models::{CreateProduct, Product};

struct SeedItem {
    name: &'static str,
    sku: &'static str,
    category: &'static str,
    quantity: i64,
    reorder_point: i64,
    unit_price: f64,
    location: &'static str,
    supplier: &'static str,
}

const CATALOG: [SeedItem; 7] = [
    SeedItem {
        name: "Portland Cement 50kg",
        sku: "CEM-001",
        category: "Cement",
        quantity: 150,
        reorder_point: 50,
        unit_price: 12.50,
        location: "Main Warehouse",
        supplier: "BuildMart Supplies",
    },
    SeedItem {
        name: "Steel Rebar 12mm",
        sku: "STL-012",
        category: "Steel",
        quantity: 8,
        reorder_point: 20,
        unit_price: 8.75,
        location: "Yard A",
        supplier: "MetalWorks Inc",
    },
    SeedItem {
        name: "Plywood Sheet 4x8",
        sku: "LUM-048",
        category: "Lumber",
        quantity: 0,
        reorder_point: 15,
        unit_price: 32.00,
        location: "Warehouse B",
        supplier: "Timber Co",
    },
    SeedItem {
        name: "Construction Sand (ton)",
        sku: "AGG-101",
        category: "Aggregates",
        quantity: 45,
        reorder_point: 10,
        unit_price: 28.00,
        location: "Yard A",
        supplier: "Quarry Direct",
    },
    SeedItem {
        name: "PVC Pipe 2in",
        sku: "PLB-002",
        category: "Plumbing",
        quantity: 12,
        reorder_point: 25,
        unit_price: 6.40,
        location: "Warehouse B",
        supplier: "FlowRight Plumbing",
    },
    SeedItem {
        name: "Electrical Wire 14AWG 250ft",
        sku: "ELC-014",
        category: "Electrical",
        quantity: 60,
        reorder_point: 20,
        unit_price: 45.99,
        location: "Main Warehouse",
        supplier: "Voltline Electric",
    },
    SeedItem {
        name: "Exterior Paint 5gal",
        sku: "PNT-005",
        category: "Paint",
        quantity: 5,
        reorder_point: 10,
        unit_price: 89.50,
        location: "Main Warehouse",
        supplier: "ColorPro Paints",
    },
];

/// Build the demo catalog with freshly derived statuses
pub fn demo_catalog() -> Vec<Product> {
    CATALOG
        .iter()
        .map(|item| {
            Product::new(CreateProduct {
                name: item.name.to_string(),
                sku: item.sku.to_string(),
                category: item.category.to_string(),
                quantity: item.quantity,
                reorder_point: item.reorder_point,
                unit_price: item.unit_price,
                location: item.location.to_string(),
                supplier: item.supplier.to_string(),
                last_restocked: None,
                status: None,
            })
        })
        .collect()
}
