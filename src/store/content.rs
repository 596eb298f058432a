use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    GalleryItem, GalleryUpdate, NewGalleryItem, NewService, NewTestimonial, ServiceItem,
    ServiceUpdate, Testimonial,
};
use crate::store::{Storage, GALLERY_FILE, SERVICES_FILE, TESTIMONIALS_FILE};

// ── Testimonials ──

pub fn list_testimonials(storage: &Storage) -> Result<Vec<Testimonial>, AppError> {
    storage.read_collection(TESTIMONIALS_FILE)
}

/// New testimonials go to the front so the public list reads newest-first.
pub fn add_testimonial(storage: &Storage, new: NewTestimonial) -> Result<Testimonial, AppError> {
    if new.name.trim().is_empty() || new.story.trim().is_empty() {
        return Err(AppError::Validation(
            "Name and Story are required".to_string(),
        ));
    }

    let mut testimonials = list_testimonials(storage)?;
    let entry = Testimonial {
        id: Uuid::new_v4().to_string(),
        name: new.name,
        role: if new.role.trim().is_empty() {
            "Client".to_string()
        } else {
            new.role
        },
        story: new.story,
        date: Utc::now(),
    };
    testimonials.insert(0, entry.clone());
    storage.write_collection(TESTIMONIALS_FILE, &testimonials)?;
    Ok(entry)
}

pub fn delete_testimonial(storage: &Storage, id: &str) -> Result<bool, AppError> {
    let id = id.trim();
    let mut testimonials = list_testimonials(storage)?;
    let before = testimonials.len();
    testimonials.retain(|t| t.id != id);

    if testimonials.len() == before {
        return Ok(false);
    }
    storage.write_collection(TESTIMONIALS_FILE, &testimonials)?;
    Ok(true)
}

// ── Services ──

pub fn list_services(storage: &Storage) -> Result<Vec<ServiceItem>, AppError> {
    storage.read_collection(SERVICES_FILE)
}

pub fn add_service(storage: &Storage, new: NewService) -> Result<ServiceItem, AppError> {
    if new.name.trim().is_empty() || new.price.trim().is_empty() {
        return Err(AppError::Validation(
            "Name and Price are required".to_string(),
        ));
    }

    let mut services = list_services(storage)?;
    let service = ServiceItem {
        id: Uuid::new_v4().to_string(),
        name: new.name,
        price: new.price,
        description: new.description,
        duration: new.duration,
    };
    services.push(service.clone());
    storage.write_collection(SERVICES_FILE, &services)?;
    Ok(service)
}

pub fn update_service(
    storage: &Storage,
    id: &str,
    update: ServiceUpdate,
) -> Result<ServiceItem, AppError> {
    let id = id.trim();
    let mut services = list_services(storage)?;

    let service = services
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;
    if let Some(name) = update.name {
        service.name = name;
    }
    if let Some(price) = update.price {
        service.price = price;
    }
    if let Some(description) = update.description {
        service.description = Some(description);
    }
    if let Some(duration) = update.duration {
        service.duration = Some(duration);
    }
    let updated = service.clone();

    storage.write_collection(SERVICES_FILE, &services)?;
    Ok(updated)
}

pub fn delete_service(storage: &Storage, id: &str) -> Result<bool, AppError> {
    let id = id.trim();
    let mut services = list_services(storage)?;
    let before = services.len();
    services.retain(|s| s.id != id);

    if services.len() == before {
        return Ok(false);
    }
    storage.write_collection(SERVICES_FILE, &services)?;
    Ok(true)
}

// ── Gallery ──

pub fn list_gallery(storage: &Storage) -> Result<Vec<GalleryItem>, AppError> {
    storage.read_collection(GALLERY_FILE)
}

pub fn add_gallery_item(storage: &Storage, new: NewGalleryItem) -> Result<GalleryItem, AppError> {
    if new.url.trim().is_empty() {
        return Err(AppError::Validation("Image URL is required".to_string()));
    }

    let mut gallery = list_gallery(storage)?;
    let item = GalleryItem {
        id: Uuid::new_v4().to_string(),
        url: new.url,
        caption: new.caption,
        category: new.category,
    };
    gallery.push(item.clone());
    storage.write_collection(GALLERY_FILE, &gallery)?;
    Ok(item)
}

pub fn update_gallery_item(
    storage: &Storage,
    id: &str,
    update: GalleryUpdate,
) -> Result<GalleryItem, AppError> {
    let id = id.trim();
    let mut gallery = list_gallery(storage)?;

    let item = gallery
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;
    if let Some(url) = update.url {
        item.url = url;
    }
    if let Some(caption) = update.caption {
        item.caption = Some(caption);
    }
    if let Some(category) = update.category {
        item.category = Some(category);
    }
    let updated = item.clone();

    storage.write_collection(GALLERY_FILE, &gallery)?;
    Ok(updated)
}

pub fn delete_gallery_item(storage: &Storage, id: &str) -> Result<bool, AppError> {
    let id = id.trim();
    let mut gallery = list_gallery(storage)?;
    let before = gallery.len();
    gallery.retain(|g| g.id != id);

    if gallery.len() == before {
        return Ok(false);
    }
    storage.write_collection(GALLERY_FILE, &gallery)?;
    Ok(true)
}
