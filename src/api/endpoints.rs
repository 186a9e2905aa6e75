//! Path templates of the backend, relative to the API base URL.

use crate::models::Id;

pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const ME: &str = "/auth/me";

pub const PSYCHOLOGISTS: &str = "/psychologists";

pub fn psychologist(id: &Id) -> String {
    format!("/psychologists/{}", id.path_segment())
}

pub fn psychologist_packages(id: &Id) -> String {
    format!("/psychologists/{}/packages", id.path_segment())
}

pub const CLIENT_SESSIONS: &str = "/clients/sessions";
pub const CLIENT_PROFILE: &str = "/clients/profile";

pub fn client_session_cancel(id: &Id) -> String {
    format!("/clients/sessions/{}/cancel", id.path_segment())
}

pub fn client_session_reschedule(id: &Id) -> String {
    format!("/clients/sessions/{}/reschedule", id.path_segment())
}

pub const MY_AVAILABILITY: &str = "/psychologists/availability";
pub const MY_SESSIONS: &str = "/psychologists/sessions";
pub const MY_PACKAGES: &str = "/psychologists/packages";
pub const MY_PROFILE: &str = "/psychologists/profile";

pub fn my_session(id: &Id) -> String {
    format!("/psychologists/sessions/{}", id.path_segment())
}

pub fn my_session_reschedule(id: &Id, approve: bool) -> String {
    let decision = if approve { "approve" } else { "reject" };
    format!(
        "/psychologists/sessions/{}/reschedule/{}",
        id.path_segment(),
        decision
    )
}

pub fn my_package(id: &Id) -> String {
    format!("/psychologists/packages/{}", id.path_segment())
}

pub const ADMIN_USERS: &str = "/admin/users";
pub const ADMIN_DOCTORS: &str = "/admin/doctors";
pub const ADMIN_BOOKINGS: &str = "/admin/bookings";

pub fn admin_user(id: &Id) -> String {
    format!("/admin/users/{}", id.path_segment())
}

pub fn admin_doctor(id: &Id) -> String {
    format!("/admin/doctors/{}", id.path_segment())
}

pub fn admin_booking(id: &Id) -> String {
    format!("/admin/bookings/{}", id.path_segment())
}

pub const SUPERADMIN_ADMINS: &str = "/superadmin/admins";

pub fn superadmin_admin(id: &Id) -> String {
    format!("/superadmin/admins/{}", id.path_segment())
}

pub fn superadmin_user_role(id: &Id) -> String {
    format!("/superadmin/users/{}/role", id.path_segment())
}
