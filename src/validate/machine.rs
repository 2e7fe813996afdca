//! Compute node validation: SSH key, OS disk and image source.

use crate::error::{ErrorList, FieldError};
use crate::field::FieldPath;
use crate::parse::types::{Image, MarketplaceImage, OSDisk, SharedGalleryImage};

use super::rules::ValidationRules;
use super::ssh;

/// Validate that an SSH public key is one well-formed authorized-key record.
pub fn validate_ssh_key(key: &str, path: &FieldPath) -> ErrorList {
    match ssh::parse_authorized_key(key) {
        Ok(_) => vec![],
        Err(err) => vec![FieldError::invalid(
            path,
            key,
            format!("the SSH public key is not valid: {}", err),
        )],
    }
}

/// Validate an OS disk. Size, OS type and storage type are checked
/// independently and all violations are reported.
pub fn validate_os_disk(disk: &OSDisk, path: &FieldPath, rules: &ValidationRules) -> ErrorList {
    let mut errors = Vec::new();

    let max = rules.max_disk_size_gb();
    if disk.disk_size_gb <= 0 || disk.disk_size_gb > max {
        errors.push(FieldError::invalid(
            &path.child("diskSizeGB"),
            disk.disk_size_gb,
            format!("the disk size should be a value between 1 and {}", max),
        ));
    }

    if disk.os_type.is_empty() {
        errors.push(FieldError::required(
            &path.child("osType"),
            "the OS type cannot be empty",
        ));
    }

    errors.extend(validate_storage_account_type(
        &disk.managed_disk.storage_account_type,
        &path.child("managedDisk").child("storageAccountType"),
        rules,
    ));

    errors
}

pub fn validate_storage_account_type(
    storage_account_type: &str,
    path: &FieldPath,
    rules: &ValidationRules,
) -> Option<FieldError> {
    if storage_account_type.is_empty() {
        return Some(FieldError::required(
            path,
            "the storage account type for the managed disk cannot be empty",
        ));
    }

    let allowed = rules.storage_account_types();
    if allowed.iter().any(|t| t == storage_account_type) {
        return None;
    }
    Some(FieldError::invalid(
        path,
        storage_account_type,
        format!("allowed values are [{}]", allowed.join(", ")),
    ))
}

/// Validate an image reference: exactly one source, each with its
/// required fields.
pub fn validate_image(image: &Image, path: &FieldPath) -> ErrorList {
    let mut errors = single_image_source(image, path);
    if !errors.is_empty() {
        return errors;
    }

    if let Some(gallery) = &image.shared_gallery {
        shared_gallery_fields(gallery, &path.child("sharedGallery"), &mut errors);
    }
    if let Some(marketplace) = &image.marketplace {
        marketplace_fields(marketplace, &path.child("marketplace"), &mut errors);
    }

    errors
}

fn single_image_source(image: &Image, path: &FieldPath) -> ErrorList {
    let mut errors = Vec::new();
    let mut found = false;

    if let Some(id) = &image.id {
        if id.is_empty() {
            errors.push(FieldError::required(
                &path.child("id"),
                "id cannot be empty if specified",
            ));
        }
        found = true;
    }

    if image.shared_gallery.is_some() {
        if found {
            errors.push(FieldError::forbidden(
                &path.child("sharedGallery"),
                "sharedGallery is not allowed when id is specified",
            ));
        }
        found = true;
    }

    if image.marketplace.is_some() {
        if found {
            errors.push(FieldError::forbidden(
                &path.child("marketplace"),
                "marketplace is not allowed when id or sharedGallery is specified",
            ));
        }
        found = true;
    }

    if !found {
        errors.push(FieldError::required(
            path,
            "one of id, sharedGallery or marketplace must be specified",
        ));
    }

    errors
}

fn shared_gallery_fields(
    gallery: &SharedGalleryImage,
    path: &FieldPath,
    errors: &mut Vec<FieldError>,
) {
    let fields = [
        ("subscriptionID", &gallery.subscription_id),
        ("resourceGroup", &gallery.resource_group),
        ("gallery", &gallery.gallery),
        ("name", &gallery.name),
        ("version", &gallery.version),
    ];
    required_fields(&fields, path, "shared gallery image", errors);
}

fn marketplace_fields(image: &MarketplaceImage, path: &FieldPath, errors: &mut Vec<FieldError>) {
    let fields = [
        ("publisher", &image.publisher),
        ("offer", &image.offer),
        ("sku", &image.sku),
        ("version", &image.version),
    ];
    required_fields(&fields, path, "marketplace image", errors);
}

fn required_fields(
    fields: &[(&str, &String)],
    path: &FieldPath,
    what: &str,
    errors: &mut Vec<FieldError>,
) {
    for (name, value) in fields {
        if value.is_empty() {
            errors.push(FieldError::required(
                &path.child(*name),
                format!("{} must be specified for a {}", name, what),
            ));
        }
    }
}
