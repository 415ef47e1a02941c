// Publisher commands: create, login, logout, delete, list and
// verify-pat. Each command reloads the store, talks to the gallery and
// the user as needed, and saves only as its last step.

use crate::api::{Gallery, NewPublisher};
use crate::error::{PublisherError, Result};
use crate::store::{Publisher, PublisherStore};
use crate::ui::{is_affirmative, spinner, PromptOptions, Prompter};
use crate::validate::validate_publisher_name;
use tracing::debug;

pub struct PublisherManager<G: Gallery, P: Prompter> {
    store: PublisherStore,
    gallery: G,
    prompter: P,
}

impl<G: Gallery, P: Prompter> PublisherManager<G, P> {
    pub fn new(store: PublisherStore, gallery: G, prompter: P) -> Self {
        PublisherManager {
            store,
            gallery,
            prompter,
        }
    }

    pub fn store(&self) -> &PublisherStore {
        &self.store
    }

    pub fn gallery(&self) -> &G {
        &self.gallery
    }

    fn prompt(&mut self, prompt: &str, options: PromptOptions) -> Result<String> {
        self.prompter
            .read(prompt, options)
            .map_err(PublisherError::Prompt)
    }

    /// Ask a yes/no question; anything but "y" aborts.
    fn confirm(&mut self, prompt: &str) -> Result<()> {
        let answer = self.prompt(prompt, PromptOptions::default())?;
        if !is_affirmative(&answer) {
            return Err(PublisherError::Aborted);
        }
        Ok(())
    }

    /// Resolve a publisher from the store. When it is not known locally
    /// this provisions it: the user is asked for a token, which is then
    /// checked against the gallery and saved.
    pub fn get_publisher(&mut self, name: &str) -> Result<Publisher> {
        validate_publisher_name(name)?;
        let doc = self.store.load()?;
        if let Some(publisher) = doc.find(name) {
            debug!(publisher = %name, "publisher found in store");
            return Ok(publisher.clone());
        }
        self.request_token(name)
    }

    /// Ask for a token, prove it against the gallery and store it.
    pub fn request_token(&mut self, name: &str) -> Result<Publisher> {
        let token = self.prompt(
            &format!("Personal Access Token for publisher '{}'", name),
            PromptOptions::silent(),
        )?;

        let pb = spinner("Verifying token...");
        let remote = self.gallery.get_publisher(&token, name);
        pb.finish_and_clear();
        let remote = remote.map_err(PublisherError::Remote)?;
        println!(
            "Authentication successful. Found publisher '{}'.",
            remote.display_name
        );

        let mut doc = self.store.load()?;
        self.store.upsert_publisher(
            &mut doc,
            Publisher::new(name, token),
        )
    }

    pub fn login(&mut self, name: &str) -> Result<Publisher> {
        validate_publisher_name(name)?;
        let doc = self.store.load()?;
        if doc.find(name).is_some() {
            self.confirm(&format!(
                "Publisher '{}' is already known. Do you want to overwrite its PAT? [y/N]",
                name
            ))?;
        }
        self.request_token(name)
    }

    pub fn logout(&mut self, name: &str) -> Result<()> {
        validate_publisher_name(name)?;
        let mut doc = self.store.load()?;
        if doc.find(name).is_none() {
            return Err(PublisherError::NotFound {
                name: name.to_string(),
            });
        }
        self.store.remove_publisher(&mut doc, name)?;
        println!("Logged out of publisher '{}'.", name);
        Ok(())
    }

    pub fn create(&mut self, name: &str) -> Result<Publisher> {
        validate_publisher_name(name)?;
        let display_name = self.prompt(
            "Publisher human-friendly name",
            PromptOptions::with_default(name),
        )?;
        let token = self.prompt("Personal Access Token", PromptOptions::silent())?;

        let payload = NewPublisher::new(name, &display_name);
        let pb = spinner("Creating publisher...");
        let created = self.gallery.create_publisher(&token, &payload);
        pb.finish_and_clear();
        created.map_err(PublisherError::Remote)?;

        let mut doc = self.store.load()?;
        let publisher = self.store.upsert_publisher(
            &mut doc,
            Publisher::new(name, token),
        )?;
        println!("Created publisher '{}'.", name);
        Ok(publisher)
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        let publisher = self.get_publisher(name)?;
        self.confirm(&format!(
            "This will FOREVER delete '{}'! Are you sure? [y/N]",
            name
        ))?;

        let pb = spinner("Deleting publisher...");
        let deleted = self.gallery.delete_publisher(&publisher.token, name);
        pb.finish_and_clear();
        deleted.map_err(PublisherError::Remote)?;

        let mut doc = self.store.load()?;
        self.store.remove_publisher(&mut doc, name)?;
        println!("Deleted publisher '{}'.", name);
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<String>> {
        let doc = self.store.load()?;
        Ok(doc.publishers.into_iter().map(|p| p.name).collect())
    }

    /// Check a token against the gallery without touching the store.
    /// Uses the stored token when none is given.
    pub fn verify_token(&mut self, name: &str, token: Option<&str>) -> Result<()> {
        validate_publisher_name(name)?;
        let token = match token {
            Some(token) => token.to_string(),
            None => {
                let doc = self.store.load()?;
                doc.find(name)
                    .map(|p| p.token.clone())
                    .ok_or_else(|| PublisherError::NotFound {
                        name: name.to_string(),
                    })?
            }
        };

        let pb = spinner("Verifying token...");
        let remote = self.gallery.get_publisher(&token, name);
        pb.finish_and_clear();
        remote.map_err(PublisherError::Remote)?;
        println!(
            "The Personal Access Token verification succeeded for the publisher '{}'.",
            name
        );
        Ok(())
    }
}

/// Run the command named by `action`. Unknown actions list publishers.
pub fn dispatch<G: Gallery, P: Prompter>(
    manager: &mut PublisherManager<G, P>,
    action: &str,
    name: Option<&str>,
) -> Result<()> {
    let name = name.unwrap_or_default();
    match action {
        "create" => manager.create(name).map(|_| ()),
        "delete" => manager.delete(name),
        "login" => manager.login(name).map(|_| ()),
        "logout" => manager.logout(name),
        "verify-pat" => manager.verify_token(name, None),
        _ => {
            for publisher in manager.list()? {
                println!("{}", publisher);
            }
            Ok(())
        }
    }
}
