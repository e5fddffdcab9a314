use super::*;

#[test]
fn validate_register_input_accepts_well_formed_form() {
    assert_eq!(
        validate_register_input(" Asha Rao ", " asha@college.edu ", "secret1", "FACULTY"),
        Ok(RegisterRequest {
            name: "Asha Rao".to_owned(),
            email: "asha@college.edu".to_owned(),
            password: "secret1".to_owned(),
            role: Role::Faculty,
        })
    );
}

#[test]
fn validate_register_input_name_bounds() {
    assert_eq!(
        validate_register_input("A", "a@b.edu", "secret1", "STUDENT"),
        Err("Name must be between 2 and 50 characters.")
    );
    let long = "x".repeat(51);
    assert_eq!(
        validate_register_input(&long, "a@b.edu", "secret1", "STUDENT"),
        Err("Name must be between 2 and 50 characters.")
    );
}

#[test]
fn validate_register_input_requires_email_with_both_parts() {
    for bad in ["", "plainaddress", "@college.edu", "user@"] {
        assert_eq!(
            validate_register_input("Asha", bad, "secret1", "STUDENT"),
            Err("Enter a valid email address."),
            "{bad}"
        );
    }
}

#[test]
fn validate_register_input_password_bounds() {
    assert_eq!(
        validate_register_input("Asha", "a@b.edu", "12345", "STUDENT"),
        Err("Password must be between 6 and 100 characters.")
    );
    assert!(validate_register_input("Asha", "a@b.edu", "123456", "STUDENT").is_ok());
}

#[test]
fn validate_register_input_rejects_unknown_role() {
    assert_eq!(validate_register_input("Asha", "a@b.edu", "secret1", "DEAN"), Err("Choose a role."));
}

#[test]
fn registered_message_points_back_to_login() {
    assert!(REGISTERED_MESSAGE.contains("login"));
}
