// Upload acceptance: category registry, validation boundary, disk storage.

pub mod storage;
pub mod validate;

use crate::config;

/// Broad media class of an upload category. Determines the size ceiling and
/// the MIME allow-list applied at the validation boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn max_file_size(&self) -> usize {
        let uploads = &config::config().uploads;
        match self {
            MediaKind::Image => uploads.image_max_file_size,
            MediaKind::Video => uploads.video_max_file_size,
        }
    }

    pub fn allowed_content_types(&self) -> &'static [String] {
        let uploads = &config::config().uploads;
        match self {
            MediaKind::Image => &uploads.image_allowed_content_types,
            MediaKind::Video => &uploads.video_allowed_content_types,
        }
    }

    /// Request-body ceiling for routes of this kind: the file limit plus
    /// headroom for multipart framing.
    pub fn body_limit(&self) -> usize {
        self.max_file_size() + 512 * 1024
    }

    /// JSON field name carrying the public URL in upload responses.
    pub fn url_field(&self) -> &'static str {
        match self {
            MediaKind::Image => "imageUrl",
            MediaKind::Video => "videoUrl",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// One upload category: a flat storage directory under the public uploads
/// root, scoped to a single media kind.
#[derive(Clone, Copy, Debug)]
pub struct UploadCategory {
    pub slug: &'static str,
    pub kind: MediaKind,
}

/// Fixed set of upload categories the admin frontend posts to.
pub const CATEGORIES: &[UploadCategory] = &[
    UploadCategory { slug: "insurance-logos", kind: MediaKind::Image },
    UploadCategory { slug: "staff-photos", kind: MediaKind::Image },
    UploadCategory { slug: "location-photos", kind: MediaKind::Image },
    UploadCategory { slug: "testimonial-photos", kind: MediaKind::Image },
    UploadCategory { slug: "content-images", kind: MediaKind::Image },
    UploadCategory { slug: "content-videos", kind: MediaKind::Video },
];

pub fn category(slug: &str) -> Option<&'static UploadCategory> {
    CATEGORIES.iter().find(|c| c.slug == slug)
}
