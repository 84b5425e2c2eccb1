use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub type ProductId = i32;

/// A persisted product. `id` is assigned by the repository and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Business attributes of a product that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreateRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

impl From<ProductCreateRequest> for NewProduct {
    fn from(req: ProductCreateRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }
}

/// Outward representation of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

/// Presence marker for a field of a partial update
///
/// A field missing from the JSON body deserializes to `Omitted` (through
/// `#[serde(default)]`); any value that is sent, `null` included, becomes `Set`.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Omitted,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Patch::Omitted)
    }

    /// Overwrite `target` if a value was sent. Returns whether it did.
    pub fn apply_to(self, target: &mut T) -> bool {
        match self {
            Patch::Set(value) => {
                *target = value;
                true
            }
            Patch::Omitted => false,
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Omitted
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Patch::Set)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Set(value) => value.serialize(serializer),
            Patch::Omitted => serializer.serialize_none(),
        }
    }
}

/// Partial update: only the fields present in the request are applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdateRequest {
    #[serde(default, skip_serializing_if = "Patch::is_omitted")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_omitted")]
    pub description: Patch<Option<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_omitted")]
    pub price: Patch<f64>,
}

impl ProductUpdateRequest {
    /// Names of the fields the caller sent
    pub fn present_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_omitted()),
            ("description", self.description.is_omitted()),
            ("price", self.price.is_omitted()),
        ]
        .into_iter()
        .filter_map(|(field, omitted)| (!omitted).then_some(field))
        .collect()
    }

    /// Merge the present fields into `product`; `id` is never touched.
    pub fn apply(self, product: &mut Product) -> usize {
        [
            self.name.apply_to(&mut product.name),
            self.description.apply_to(&mut product.description),
            self.price.apply_to(&mut product.price),
        ]
        .into_iter()
        .filter(|applied| *applied)
        .count()
    }
}
