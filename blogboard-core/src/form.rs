use crate::error::BlogError;

/// Directory prefix used for selected file names. Files are never uploaded;
/// the path is only recorded on the post.
pub const ASSET_DIR: &str = "assets";

/// Raw values read from the blog form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub title: String,
    pub name: String,
    pub content: String,
    /// File name of the selected profile picture, if any.
    pub profile_picture_file: Option<String>,
    /// File names of the selected blog images, in selection order.
    pub image_files: Vec<String>,
}

/// Form values that passed validation, with file names mapped to asset paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidForm {
    pub title: String,
    pub name: String,
    pub content: String,
    pub profile_picture: Option<String>,
    pub blog_images: Vec<String>,
}

impl FormInput {
    pub fn validate(&self) -> Result<ValidForm, BlogError> {
        let title = self.title.trim();
        let name = self.name.trim();
        let content = self.content.trim();
        if title.is_empty() || name.is_empty() || content.is_empty() {
            return Err(BlogError::MissingRequiredFields);
        }

        Ok(ValidForm {
            title: title.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            profile_picture: self
                .profile_picture_file
                .as_deref()
                .filter(|file| !file.trim().is_empty())
                .map(asset_path),
            blog_images: self
                .image_files
                .iter()
                .filter(|file| !file.trim().is_empty())
                .map(|file| asset_path(file))
                .collect(),
        })
    }
}

pub fn asset_path(file_name: &str) -> String {
    format!("{}/{}", ASSET_DIR, file_name)
}
