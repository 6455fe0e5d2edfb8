use serde::{Deserialize, Serialize};

use warehouse_core::{DomainError, DomainResult, Entity, MaterialTypeId, ValueObject};

/// Descriptor of a stockable kind of material.
///
/// `maximum_capacity` bounds the quantity argument of a single add, update,
/// drop or transfer. It does not bound the total a warehouse may hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialType {
    id: MaterialTypeId,
    name: String,
    description: String,
    icon: String,
    maximum_capacity: i64,
}

impl MaterialType {
    /// Create a material type with a fresh identifier.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        maximum_capacity: i64,
    ) -> DomainResult<Self> {
        Self::with_id(MaterialTypeId::new(), name, description, icon, maximum_capacity)
    }

    pub fn with_id(
        id: MaterialTypeId,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        maximum_capacity: i64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("material name cannot be empty"));
        }
        if maximum_capacity <= 0 {
            return Err(DomainError::validation(format!(
                "maximum capacity of {name} must be positive (got {maximum_capacity})"
            )));
        }

        Ok(Self {
            id,
            name,
            description: description.into(),
            icon: icon.into(),
            maximum_capacity,
        })
    }

    pub fn id_typed(&self) -> MaterialTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn maximum_capacity(&self) -> i64 {
        self.maximum_capacity
    }

    /// Validate the quantity argument of a single stock operation.
    ///
    /// Fails with `InvalidQuantity` for `quantity <= 0` and with
    /// `ExceedingCapacity` above `maximum_capacity`.
    pub fn check_quantity(&self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantity(quantity));
        }
        if quantity > self.maximum_capacity {
            return Err(DomainError::ExceedingCapacity {
                material: self.name.clone(),
                quantity,
                capacity: self.maximum_capacity,
            });
        }
        Ok(())
    }
}

impl Entity for MaterialType {
    type Id = MaterialTypeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A material type paired with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub material_type: MaterialType,
    pub quantity: i64,
}

impl Material {
    pub fn new(material_type: MaterialType, quantity: i64) -> Self {
        Self {
            material_type,
            quantity,
        }
    }

    pub fn id(&self) -> MaterialTypeId {
        self.material_type.id_typed()
    }

    pub fn name(&self) -> &str {
        self.material_type.name()
    }
}

impl ValueObject for Material {}

impl core::fmt::Display for Material {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.material_type.name, self.quantity)
    }
}
