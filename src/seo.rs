//! schema.org structured data for storefront pages.

use serde_json::{Value, json};

use crate::{config::SiteConfig, models::Product};

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const PRICE_CURRENCY: &str = "INR";
pub const DEFAULT_BRAND: &str = "Reeown";

const ORGANIZATION_NAME: &str = "Eco Dispose";
const ORGANIZATION_URL: &str = "https://www.eco-dispose.com";

/// Every JSON-LD node for a product detail page, combined into one `@graph`:
/// organization, website, product and, when the product belongs to a
/// collection, its breadcrumb trail.
pub fn page_schema(site: &SiteConfig, product: &Product) -> Value {
    let mut graph = vec![
        graph_node(organization_schema(site)),
        graph_node(website_schema(site)),
        graph_node(product_schema(site, product)),
    ];
    if let Some(collection) = &product.collection {
        let slug = product.collection_slug.as_deref().unwrap_or_default();
        graph.push(graph_node(breadcrumb_schema(site, collection, slug)));
    }

    json!({
        "@context": SCHEMA_CONTEXT,
        "@graph": graph,
    })
}

/// JSON-LD `Product` document for a product detail page.
pub fn product_schema(site: &SiteConfig, product: &Product) -> Value {
    let images = match &product.image {
        Some(image) if !image.is_empty() => vec![image.clone()],
        _ => vec![site.logo_url()],
    };
    let availability = if product.in_stock() {
        "https://schema.org/InStock"
    } else {
        "https://schema.org/OutOfStock"
    };

    let mut schema = json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Product",
        "name": product.name,
        "description": product
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| site.description.clone()),
        "image": images,
        "brand": {
            "@type": "Brand",
            "name": product.product_type.as_deref().unwrap_or(DEFAULT_BRAND),
        },
        "offers": {
            "@type": "Offer",
            "url": site.url(&format!("/product/{}", product.id)),
            "priceCurrency": PRICE_CURRENCY,
            "price": format_major_units(product.effective_price()),
            "availability": availability,
            "itemCondition": item_condition(product.condition.as_deref()),
        },
    });

    if product.rating > 0.0 {
        schema["aggregateRating"] = json!({
            "@type": "AggregateRating",
            "ratingValue": product.rating,
            "reviewCount": product.review_count,
        });
    }

    schema
}

pub fn organization_schema(site: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "Organization",
        "name": ORGANIZATION_NAME,
        "url": ORGANIZATION_URL,
        "logo": site.logo_url(),
        "sameAs": [ORGANIZATION_URL],
        "contactPoint": {
            "@type": "ContactPoint",
            "contactType": "Customer Service",
            "areaServed": "IN",
            "availableLanguage": "en",
        },
    })
}

/// `WebSite` node with a sitelinks search box pointing at `/search`.
pub fn website_schema(site: &SiteConfig) -> Value {
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": site.name,
        "url": site.base_url,
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{}/search?q={{search_term_string}}", site.base_url),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

/// Home -> collection trail. An empty name reads as "Products".
pub fn breadcrumb_schema(site: &SiteConfig, collection: &str, slug: &str) -> Value {
    let name = if collection.is_empty() {
        "Products"
    } else {
        collection
    };
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": [
            {
                "@type": "ListItem",
                "position": 1,
                "name": "Home",
                "item": site.base_url,
            },
            {
                "@type": "ListItem",
                "position": 2,
                "name": name,
                "item": site.url(&format!("/products/{slug}")),
            },
        ],
    })
}

// nodes inside @graph inherit the outer context
fn graph_node(mut node: Value) -> Value {
    if let Some(object) = node.as_object_mut() {
        object.remove("@context");
    }
    node
}

fn item_condition(condition: Option<&str>) -> String {
    let name: String = condition
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if name.is_empty() {
        "https://schema.org/UsedCondition".to_string()
    } else {
        format!("https://schema.org/{name}")
    }
}

/// `12345` paise -> `"123.45"`.
fn format_major_units(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let minor = minor.unsigned_abs();
    format!("{sign}{}.{:02}", minor / 100, minor % 100)
}
