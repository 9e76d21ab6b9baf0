use crate::auth::{login, use_auth, use_session};
use crate::web::router::Link;
use expense_manager_shared::AppRoute;
use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let session = use_session();

    let (token, set_token) = signal(String::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 登录成功后路由服务会把访客页重定向到面板，这里不需要手动导航
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if token.get().trim().is_empty() {
            set_error_msg.set(Some("Please enter your access token".to_string()));
            return;
        }
        set_error_msg.set(None);
        if !login(&auth, &session, &token.get()) {
            set_error_msg.set(Some("Sign in failed".to_string()));
        }
    };

    view! {
        <form class="card-body" on:submit=on_submit>
            <h2 class="card-title">"Sign in"</h2>
            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="form-control">
                <label class="label" for="token">
                    <span class="label-text">"Access token"</span>
                </label>
                <input
                    id="token"
                    type="password"
                    placeholder="••••••••"
                    on:input=move |ev| set_token.set(event_target_value(&ev))
                    prop:value=token
                    class="input input-bordered"
                    required
                />
            </div>
            <div class="form-control mt-6">
                <button class="btn btn-primary">"Sign in"</button>
            </div>
            <p class="text-sm text-center mt-2">
                "No account yet? "
                <Link to=AppRoute::Register.path() class="link link-primary">"Create one"</Link>
            </p>
        </form>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! {
        <div class="card-body">
            <h2 class="card-title">"Create an account"</h2>
            <p class="text-base-content/70">
                "Track your income, expenses and budgets in one place."
            </p>
            <p class="text-sm text-center mt-2">
                "Already registered? "
                <Link to=AppRoute::Login.path() class="link link-primary">"Sign in"</Link>
            </p>
        </div>
    }
}
