use crate::model::{ContactMessage, ContactTab, ContactUpdate};
use atelier_framework::{Resource, Searchable};

impl Resource for ContactMessage {
    type Id = u32;
    // Messages are created by the public contact form, never from here.
    type Create = ContactUpdate;
    type Update = ContactUpdate;
    const COLLECTION: &'static str = "/api/admin/contact";

    fn id(&self) -> &u32 {
        &self.id
    }
}

impl Searchable for ContactMessage {
    type Tab = ContactTab;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str(), self.message.as_str()];
        fields.extend(self.phone.as_deref());
        fields
    }

    fn in_tab(&self, tab: ContactTab) -> bool {
        match tab {
            ContactTab::All => true,
            ContactTab::Unread => !self.is_read,
            ContactTab::Read => self.is_read,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_framework::ListFilter;
    use chrono::{TimeZone, Utc};

    fn message(id: u32, name: &str, is_read: bool) -> ContactMessage {
        ContactMessage {
            id,
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            message: "Do you resize rings?".into(),
            is_read,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_unread_tab_with_search() {
        let inbox = [
            message(1, "Asha", false),
            message(2, "Ravi", true),
            message(3, "Meera", false),
        ];
        let filter = ListFilter::new()
            .with_tab(ContactTab::Unread)
            .with_search("meera@");
        let found = filter.apply(&inbox);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 3);

        let read = ListFilter::new().with_tab(ContactTab::Read).apply(&inbox);
        assert_eq!(read.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);
    }
}
