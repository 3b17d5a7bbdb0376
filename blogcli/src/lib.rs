pub use crate::app::BlogCliApp;

mod app {
    use anyhow::{Context, Result};
    use blogboard_core::*;
    use std::fs;
    use std::io::{self, BufRead, Write};
    use std::path::Path;

    /// Terminal width stand-in; the CLI always uses the wide layout.
    const CLI_VIEWPORT: u32 = 1280;

    pub struct BlogCliApp {
        session: BlogSession<Box<dyn PostStore>>,
        source: String,
        draft: FormInput,
    }

    impl BlogCliApp {
        pub fn new(store: Box<dyn PostStore>, source: &str) -> Self {
            Self {
                session: BlogSession::new(store, CLI_VIEWPORT),
                source: source.to_string(),
                draft: FormInput::default(),
            }
        }

        pub fn list(&mut self, html_out: Option<&Path>) -> Result<()> {
            let html = self.session.refresh()?;
            self.print_posts();
            if let Some(path) = html_out {
                write_html(path, &html)?;
            }
            Ok(())
        }

        pub fn search(&mut self, query: &str, html_out: Option<&Path>) -> Result<()> {
            let html = self.session.search(query)?;
            self.print_posts();
            if let Some(path) = html_out {
                write_html(path, &html)?;
            }
            Ok(())
        }

        pub fn show(&self, id: &str) -> Result<()> {
            let post = self.session.store().get_post(id)?;
            println!("#{} {}", post.id, post.title);
            println!("By {}", post.name);
            println!(
                "Date: {}",
                post.date
                    .as_deref()
                    .and_then(display_date)
                    .unwrap_or_else(|| "Unknown Date".to_string())
            );
            if let Some(picture) = post.profile_picture() {
                println!("Profile picture: {}", picture);
            }
            for image in &post.blog_images {
                println!("Image: {}", image);
            }
            println!();
            println!("{}", post.content);
            Ok(())
        }

        /// Submit `input` in the current mode. Returns false when validation
        /// rejected the form.
        pub fn submit(&mut self, input: &FormInput) -> Result<bool> {
            match self.session.submit(input)? {
                SubmitOutcome::Rejected(reason) => {
                    println!("{}", reason);
                    Ok(false)
                }
                SubmitOutcome::Created { id } => {
                    println!("Created post {}", id);
                    self.draft = FormInput::default();
                    Ok(true)
                }
                SubmitOutcome::Updated { id } => {
                    println!("Updated post {}", id);
                    self.draft = FormInput::default();
                    Ok(true)
                }
            }
        }

        /// Submit for one-shot commands: a rejected form is an error.
        pub fn save(&mut self, input: &FormInput) -> Result<()> {
            if let Err(reason) = input.validate() {
                return Err(reason.into());
            }
            self.submit(input)?;
            Ok(())
        }

        /// Enter edit mode for `id` and load its fields into the draft.
        pub fn begin_edit(&mut self, id: &str) -> Result<()> {
            let fields = self.session.edit(id)?;
            println!("Editing post {} (date will be set to {})", id, fields.date);
            self.draft = FormInput {
                title: fields.title,
                name: fields.name,
                content: fields.content,
                profile_picture_file: None,
                image_files: Vec::new(),
            };
            Ok(())
        }

        pub fn draft(&self) -> &FormInput {
            &self.draft
        }

        pub fn delete(&mut self, id: &str) -> Result<()> {
            self.session.delete(id)?;
            println!("Deleted post {}", id);
            Ok(())
        }

        fn cancel_edit(&mut self) {
            self.session.cancel_edit();
            self.draft = FormInput::default();
        }

        fn clear_form(&mut self) {
            self.session.clear_form();
            self.draft = FormInput::default();
        }

        fn print_posts(&self) {
            let posts = self.session.posts();
            if posts.is_empty() {
                println!("No posts found");
                return;
            }
            // Newest first, like the rendered page.
            for post in posts.iter().rev() {
                let date = post
                    .date
                    .as_deref()
                    .and_then(display_date)
                    .unwrap_or_else(|| "Unknown Date".to_string());
                println!("[{}] {} - by {} ({})", post.id, post.title, post.name, date);
            }
        }

        fn show_menu(&self) -> Result<()> {
            let view = self.session.editor().view();

            println!("\n=== Blogboard - {} ===", view.heading);
            println!("Server: {} | Posts loaded: {}", self.source, self.session.posts().len());
            println!();
            println!("1. List posts");
            println!("2. Search posts");
            println!("3. {}", view.submit_label);
            println!("4. Edit post");
            println!("5. Delete post");
            if view.cancel_visible {
                println!("6. Cancel edit");
            } else {
                println!("6. Clear form");
            }
            println!("7. Exit");
            print!("\nSelect an option (1-7): ");
            io::stdout().flush()?;
            Ok(())
        }

        fn prompt_form(&self, input: &mut impl BufRead) -> Result<FormInput> {
            let current = &self.draft;
            let title = prompt_with_default(input, "Title", &current.title)?;
            let name = prompt_with_default(input, "Author Name", &current.name)?;
            let content = prompt_with_default(input, "Content", &current.content)?;
            let picture = prompt(input, "Profile picture file name (blank for none)")?;

            let image_files = if self.session.editor().is_editing() {
                Vec::new()
            } else {
                prompt(input, "Blog image file names (comma separated)")?
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            };

            Ok(FormInput {
                title,
                name,
                content,
                profile_picture_file: Some(picture).filter(|p| !p.is_empty()),
                image_files,
            })
        }

        pub fn run(&mut self) -> Result<()> {
            let stdin = io::stdin();
            let mut input = stdin.lock();

            if let Err(e) = self.list(None) {
                eprintln!("Failed to load posts: {:#}", e);
            }

            loop {
                self.show_menu()?;

                let mut choice = String::new();
                if input.read_line(&mut choice)? == 0 {
                    break;
                }

                match choice.trim() {
                    "1" => {
                        if let Err(e) = self.list(None) {
                            eprintln!("Failed to list posts: {:#}", e);
                        }
                    }
                    "2" => {
                        let query = prompt(&mut input, "Search")?;
                        if let Err(e) = self.search(&query, None) {
                            eprintln!("Failed to search posts: {:#}", e);
                        }
                    }
                    "3" => {
                        let form = self.prompt_form(&mut input)?;
                        match self.submit(&form) {
                            Ok(true) => {
                                if let Err(e) = self.list(None) {
                                    eprintln!("Failed to list posts: {:#}", e);
                                }
                            }
                            Ok(false) => {}
                            Err(e) => eprintln!("Failed to submit post: {:#}", e),
                        }
                    }
                    "4" => {
                        let id = prompt(&mut input, "Post id to edit")?;
                        if let Err(e) = self.begin_edit(&id) {
                            eprintln!("Failed to load post {}: {:#}", id, e);
                        }
                    }
                    "5" => {
                        let id = prompt(&mut input, "Post id to delete")?;
                        match self.delete(&id) {
                            Ok(()) => {
                                if let Err(e) = self.list(None) {
                                    eprintln!("Failed to list posts: {:#}", e);
                                }
                            }
                            Err(e) => eprintln!("Failed to delete post {}: {:#}", id, e),
                        }
                    }
                    "6" => {
                        if self.session.editor().is_editing() {
                            self.cancel_edit();
                            println!("Edit cancelled");
                        } else {
                            self.clear_form();
                            println!("Form cleared");
                        }
                    }
                    "7" => {
                        println!("Exiting Blogboard...");
                        break;
                    }
                    _ => {
                        println!("Invalid option. Please select 1-7.");
                    }
                }
            }

            Ok(())
        }
    }

    fn prompt(input: &mut impl BufRead, label: &str) -> Result<String> {
        print!("{}: ", label);
        io::stdout().flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn prompt_with_default(input: &mut impl BufRead, label: &str, current: &str) -> Result<String> {
        if current.is_empty() {
            return prompt(input, label);
        }
        let answer = prompt(input, &format!("{} [{}]", label, current))?;
        if answer.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    fn write_html(path: &Path, html: &str) -> Result<()> {
        fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote rendered posts to {}", path.display());
        Ok(())
    }

}
