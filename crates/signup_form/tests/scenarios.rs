//! End-to-end scenarios for the sign-up form, driven through the controller
//! the way a presentation layer would.

use signup_form::{
    Effect, ErrorKey, FieldChange, FieldName, FieldValues, FormConfig, Phase, SignupForm,
    ValidationResult, check,
};

fn fill(form: &mut SignupForm, values: &FieldValues) {
    for (field, value) in values.iter() {
        form.on_field_change(FieldChange::new(field, value));
    }
}

fn values(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    phone: &str,
    age: &str,
) -> FieldValues {
    FieldValues {
        name: name.into(),
        email: email.into(),
        password: password.into(),
        confirm_password: confirm.into(),
        phone: phone.into(),
        age: age.into(),
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn minimal_valid_submission_is_accepted_and_resets() {
        let mut form = SignupForm::default();
        fill(&mut form, &values("Jo", "a@b.com", "12345678", "12345678", "", ""));

        let effects = form.on_submit();

        let view = form.view();
        assert!(view.errors.is_empty());
        assert!(view.submitted);
        assert!(view.values.is_empty());
        assert_eq!(view.phase, Phase::SubmittedValid);
        assert!(matches!(effects.as_slice(), [Effect::ScheduleReset { .. }]));
    }

    #[test]
    fn every_field_invalid_yields_six_errors() {
        let mut form = SignupForm::default();
        fill(&mut form, &values("J", "bad", "short", "x", "123", "15"));

        form.on_submit();

        let view = form.view();
        assert!(!view.submitted);
        assert_eq!(view.errors.len(), 6);
        let keys: Vec<_> = view.errors.keys().collect();
        let expected: Vec<_> = FieldName::ALL.into_iter().map(ErrorKey::Field).collect();
        assert_eq!(keys, expected);
        assert_eq!(view.values.name, "J", "values are kept on rejection");
    }

    #[test]
    fn formatted_phone_is_normalized_and_accepted() {
        let input = values("Jo", "a@b.com", "12345678", "12345678", "(123) 456-7890", "");
        match check(&input) {
            ValidationResult::Accepted(payload) => {
                assert_eq!(payload.phone.as_deref(), Some("1234567890"));
            }
            ValidationResult::Rejected(issues) => panic!("unexpected rejection: {issues:?}"),
        }
    }

    #[test]
    fn age_outside_range_is_rejected() {
        for age in ["17", "101"] {
            let input = values("Jo", "a@b.com", "12345678", "12345678", "", age);
            let errors = check(&input).field_errors();
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.get(FieldName::Age),
                Some("Age must be between 18 and 100")
            );
        }
    }

    #[test]
    fn editing_clears_only_that_fields_error() {
        let mut form = SignupForm::default();
        fill(&mut form, &values("J", "bad", "short", "x", "", ""));
        form.on_submit();
        assert_eq!(form.view().errors.len(), 4);

        form.on_field_change(FieldChange::new(FieldName::Email, "still bad"));

        let view = form.view();
        assert!(!view.errors.contains(FieldName::Email));
        assert_eq!(view.errors.len(), 3);
        assert!(view.errors.contains(FieldName::Name));
        assert_eq!(view.phase, Phase::Editing);
    }

    #[test]
    fn editing_a_clean_field_leaves_errors_alone() {
        let mut form = SignupForm::default();
        fill(&mut form, &values("J", "a@b.com", "12345678", "12345678", "", ""));
        form.on_submit();

        form.on_field_change(FieldChange::new(FieldName::Phone, "1"));
        assert_eq!(
            form.view().errors.get(FieldName::Name),
            Some("Name must be at least 2 characters")
        );
    }

    #[test]
    fn resubmitting_while_successful_validates_empty_form() {
        let mut form = SignupForm::default();
        fill(&mut form, &values("Jo", "a@b.com", "12345678", "12345678", "", ""));
        form.on_submit();
        assert!(form.view().submitted);

        let effects = form.on_submit();

        let view = form.view();
        assert!(!view.submitted);
        assert!(view.errors.contains(FieldName::Name));
        assert!(view.errors.contains(FieldName::Email));
        assert!(view.errors.contains(FieldName::Password));
        assert!(
            !view.errors.contains(FieldName::ConfirmPassword),
            "empty passwords still match"
        );
        assert!(matches!(effects.as_slice(), [Effect::CancelReset(_)]));
    }

    #[test]
    fn rejection_replaces_previous_errors_wholesale() {
        let mut form = SignupForm::default();
        fill(&mut form, &values("J", "a@b.com", "12345678", "12345678", "", ""));
        form.on_submit();
        assert!(form.view().errors.contains(FieldName::Name));

        fill(&mut form, &values("Jo", "a@b.com", "12345678", "12345678", "", "abc"));
        form.on_submit();

        let view = form.view();
        assert_eq!(view.errors.len(), 1);
        assert_eq!(view.errors.get(FieldName::Age), Some("Age must be a number"));
    }
}

mod configuration {
    use super::*;

    #[test]
    fn configured_thresholds_apply_to_controller() {
        let config = FormConfig::from_toml_str(
            "[validation]\npassword_min_len = 12\n\n[reset]\ndelay_ms = 500\n",
        )
        .unwrap();
        let mut form = SignupForm::new(config);
        fill(&mut form, &values("Jo", "a@b.com", "12345678", "12345678", "", ""));
        form.on_submit();
        assert_eq!(
            form.view().errors.get(FieldName::Password),
            Some("Password must be at least 12 characters")
        );

        fill(
            &mut form,
            &values("Jo", "a@b.com", "123456789012", "123456789012", "", ""),
        );
        let effects = form.on_submit();
        assert!(matches!(
            effects.as_slice(),
            [Effect::ScheduleReset { after, .. }] if after.as_millis() == 500
        ));
    }

    #[test]
    fn config_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.toml");
        std::fs::write(&path, "[validation]\nage_min = 21\n").unwrap();

        let config = FormConfig::load(&path).unwrap();
        assert_eq!(config.validation.age_min, 21);
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FormConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, signup_form::FormError::Io(_)));
    }
}
