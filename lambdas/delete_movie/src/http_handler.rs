use lambda_http::RequestExt;
use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::core::{
    parse_movie_id, DeleteMovieResponse, ErrorResponse, MessageResponse, MovieRepository,
};
use shared::utils::json_response;

pub(crate) struct HandlerDeps<M: MovieRepository> {
    pub movie_repo: M,
}

pub(crate) async fn function_handler<M: MovieRepository>(
    deps: &HandlerDeps<M>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    tracing::info!("Received event: {:?}", event);

    let movie_id = event
        .path_parameters_ref()
        .and_then(|params| params.first("movieId"))
        .and_then(parse_movie_id);

    let Some(movie_id) = movie_id else {
        return json_response(&StatusCode::NOT_FOUND, &MessageResponse::missing_movie_id());
    };

    match deps.movie_repo.delete_movie(movie_id).await {
        Ok(None) => json_response(&StatusCode::NOT_FOUND, &MessageResponse::invalid_movie_id()),
        Ok(Some(movie)) => json_response(&StatusCode::OK, &DeleteMovieResponse::new(movie)),
        Err(e) => {
            tracing::error!("Failed to delete movie {}: {:?}", movie_id, e);
            json_response(
                &StatusCode::INTERNAL_SERVER_ERROR,
                &ErrorResponse::internal(),
            )
        }
    }
}
