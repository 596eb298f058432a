pub mod booking;
pub mod content;
pub mod testimonial;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use content::{GalleryItem, GalleryUpdate, NewGalleryItem, NewService, ServiceItem, ServiceUpdate};
pub use testimonial::{NewTestimonial, Testimonial};
