use actix_web::web;

use crate::middleware::admin::AdminMiddleware;
use crate::routes::results;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            .service(
                web::resource("/results/{fixture_id}")
                    .route(web::put().to(results::put_result))
            )
    );
}
