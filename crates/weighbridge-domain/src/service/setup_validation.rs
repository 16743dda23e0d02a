//! Local checks for setup and login requests

use weighbridge_types::{Credentials, NewAxleGroup, NewVehicleType, ValidationError};

/// Minimum number of axle groups a vehicle type must declare
pub const MIN_VEHICLE_TYPE_AXLE_GROUPS: usize = 2;

pub fn validate_new_axle_group(group: &NewAxleGroup) -> Result<(), ValidationError> {
    if group.group_name.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "groupName",
            message: "axle group name is required".to_string(),
        });
    }
    if !group.allowed.is_finite() || group.allowed <= 0.0 {
        return Err(ValidationError::InvalidField {
            field: "allowed",
            message: format!("weight limit must be positive, got {}", group.allowed),
        });
    }
    Ok(())
}

pub fn validate_new_vehicle_type(vehicle_type: &NewVehicleType) -> Result<(), ValidationError> {
    if vehicle_type.vehicle_type.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "type",
            message: "vehicle type name is required".to_string(),
        });
    }
    if vehicle_type.axle_group_ids.len() < MIN_VEHICLE_TYPE_AXLE_GROUPS {
        return Err(ValidationError::InvalidField {
            field: "axelGroup",
            message: format!(
                "at least {} axle groups are required, got {}",
                MIN_VEHICLE_TYPE_AXLE_GROUPS,
                vehicle_type.axle_group_ids.len()
            ),
        });
    }
    if !vehicle_type.price.is_finite() || vehicle_type.price < 0.0 {
        return Err(ValidationError::InvalidField {
            field: "price",
            message: format!("price must be zero or more, got {}", vehicle_type.price),
        });
    }
    Ok(())
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    let email = credentials.email.trim();
    if email.is_empty() || !email.contains('@') || email.len() > 255 {
        return Err(ValidationError::InvalidField {
            field: "email",
            message: "must be a valid email".to_string(),
        });
    }
    if credentials.password.is_empty() || credentials.password.len() > 255 {
        return Err(ValidationError::InvalidField {
            field: "password",
            message: "password is required".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axle_group_requires_name_and_positive_limit() {
        let mut group = NewAxleGroup {
            group_name: "Tridem".to_string(),
            description: String::new(),
            allowed: 21000.0,
        };
        assert!(validate_new_axle_group(&group).is_ok());

        group.allowed = 0.0;
        assert!(validate_new_axle_group(&group).is_err());

        group.allowed = 100.0;
        group.group_name = " ".to_string();
        assert!(validate_new_axle_group(&group).is_err());
    }

    #[test]
    fn test_vehicle_type_requires_two_axle_groups() {
        let mut vt = NewVehicleType {
            vehicle_type: "Semi".to_string(),
            price: 15.0,
            axle_group_ids: vec![1],
        };
        assert!(matches!(
            validate_new_vehicle_type(&vt),
            Err(ValidationError::InvalidField { field: "axelGroup", .. })
        ));
        vt.axle_group_ids.push(2);
        assert!(validate_new_vehicle_type(&vt).is_ok());
    }

    #[test]
    fn test_credentials() {
        let ok = Credentials {
            email: "ops@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(validate_credentials(&ok).is_ok());

        let bad = Credentials {
            email: "ops".to_string(),
            ..ok
        };
        assert!(validate_credentials(&bad).is_err());
    }
}
