#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// The store marks administrators with the literal "admin" role label;
    /// any other label (or none) is an ordinary viewer.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("admin") => Role::Admin,
            _ => Role::Employee,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_label_maps_to_admin() {
        assert_eq!(Role::from_label(Some("admin")), Role::Admin);
        assert!(Role::from_label(Some("admin")).is_admin());
    }

    #[test]
    fn anything_else_is_an_ordinary_viewer() {
        assert_eq!(Role::from_label(None), Role::Employee);
        assert_eq!(Role::from_label(Some("hr")), Role::Employee);
        assert_eq!(Role::from_label(Some("")), Role::Employee);
    }
}
