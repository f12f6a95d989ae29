//! Catalog entities: products and their suppliers

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use super::default_true;

/// Parts supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

/// Stocked part
///
/// `precio` and `stock` arrive as numbers or as numeric strings depending on
/// how the backend's decimal columns are serialized; both are accepted.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub stock: i64,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "proveedorId", default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(rename = "proveedor", default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Supplier>,
}

/// Body for creating or patching a product. Unset fields are left out so
/// the same type serves partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "proveedorId", skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
}

/// Body for creating or patching a supplier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierInput {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn product_accepts_string_encoded_decimals() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "nombre": "Filtro de aceite",
            "precio": "129.90",
            "stock": "4",
            "proveedorId": 2,
            "proveedor": { "id": 2, "nombre": "Bosch" }
        }))
        .unwrap();

        assert_eq!(product.price, 129.90);
        assert_eq!(product.stock, 4);
        assert!(product.active);
        assert_eq!(product.supplier.unwrap().name, "Bosch");
    }

    #[test]
    fn product_serializes_wire_names() {
        let product = Product {
            id: 1,
            name: "Balata".into(),
            description: None,
            price: 350.0,
            stock: 12,
            category: Some("Frenos".into()),
            active: true,
            supplier_id: Some(3),
            supplier: None,
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["nombre"], "Balata");
        assert_eq!(value["precio"], 350.0);
        assert_eq!(value["categoria"], "Frenos");
        assert_eq!(value["proveedorId"], 3);
        assert!(value.get("descripcion").is_none());
    }

    #[test]
    fn partial_input_only_sends_set_fields() {
        let patch = ProductInput { stock: Some(40), ..ProductInput::default() };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "stock": 40 }));
    }
}
