//! Addresses of the admin web views

const WEB_ROOT: &str = "/admin/web";

/// Admin address of a book, given its public catalog address
pub fn book_admin_url(book_url: &str) -> String {
    book_url.replacen("works", "admin/works", 1)
}

pub fn lane_edit_path(library: &str, lane_id: i32) -> String {
    format!("{}/lanes/{}/edit/{}", WEB_ROOT, library, lane_id)
}

pub fn list_create_path(library: &str) -> String {
    format!("{}/lists/{}/create", WEB_ROOT, library)
}

pub fn list_edit_path(library: &str, list_id: i32) -> String {
    format!("{}/lists/{}/edit/{}", WEB_ROOT, library, list_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(lane_edit_path("nypl", 5), "/admin/web/lanes/nypl/edit/5");
        assert_eq!(list_create_path("nypl"), "/admin/web/lists/nypl/create");
        assert_eq!(list_edit_path("nypl", 3), "/admin/web/lists/nypl/edit/3");
        assert_eq!(
            book_admin_url("http://example.org/nypl/works/Axis%20360/1234"),
            "http://example.org/nypl/admin/works/Axis%20360/1234"
        );
    }
}
